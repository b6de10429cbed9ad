use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Security-alert queue triage", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List alerts with facet filters
    List(ListArgs),

    /// Follow alerts
    Follow {
        /// Alert ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Unfollow alerts
    Unfollow {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Mark alerts as read
    MarkRead {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Mark alerts as unread
    MarkUnread {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Delete alerts
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Merge alerts into a case
    Merge(MergeArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ListArgs {
    /// Free-text keyword
    #[arg(long)]
    pub keyword: Option<String>,

    /// Status facet values (repeatable)
    #[arg(long)]
    pub status: Vec<String>,

    /// Tag facet values (repeatable)
    #[arg(long)]
    pub tag: Vec<String>,

    /// Source facet values (repeatable)
    #[arg(long)]
    pub source: Vec<String>,

    /// Type facet values (repeatable)
    #[arg(long = "type")]
    pub alert_type: Vec<String>,

    /// Severity label (Low, Medium, High, Critical; repeatable)
    #[arg(long)]
    pub severity: Vec<String>,

    /// Title filter
    #[arg(long)]
    pub title: Option<String>,

    /// Source reference filter
    #[arg(long)]
    pub reference: Option<String>,

    /// Calendar date (YYYY-MM-DD); expands to the full day
    #[arg(long)]
    pub date: Option<String>,

    /// Start from the registry defaults instead of the saved context
    #[arg(long)]
    pub reset: bool,

    /// Sort key, e.g. severity or title
    #[arg(long)]
    pub sort: Option<String>,

    /// Page size
    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Alert ids to merge
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Target an existing case by number or title
    #[arg(long, conflicts_with = "new_case")]
    pub case: Option<String>,

    /// Create a new case as the merge target
    #[arg(long = "new", requires = "title")]
    pub new_case: bool,

    /// Title for the new case
    #[arg(long)]
    pub title: Option<String>,

    /// Case template name for the new case
    #[arg(long)]
    pub template: Option<String>,
}
