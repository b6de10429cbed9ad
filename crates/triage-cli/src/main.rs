mod cli;
mod commands;
mod dialogs;
mod notify;

use anyhow::Result;
use clap::Parser;
use triage_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load()?;

    match cli.command {
        cli::Commands::List(args) => commands::list::handle(args, &config).await,
        cli::Commands::Follow { ids } => {
            commands::bulk::handle(triage_actions::BulkAction::Follow, ids, &config).await
        }
        cli::Commands::Unfollow { ids } => {
            commands::bulk::handle(triage_actions::BulkAction::Unfollow, ids, &config).await
        }
        cli::Commands::MarkRead { ids } => {
            commands::bulk::handle(triage_actions::BulkAction::MarkAsRead, ids, &config).await
        }
        cli::Commands::MarkUnread { ids } => {
            commands::bulk::handle(triage_actions::BulkAction::MarkAsUnread, ids, &config).await
        }
        cli::Commands::Delete { ids } => {
            commands::bulk::handle(triage_actions::BulkAction::Delete, ids, &config).await
        }
        cli::Commands::Merge(args) => commands::merge::handle(args, &config).await,
        cli::Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(())
        }
    }
}
