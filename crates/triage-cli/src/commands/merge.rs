use std::sync::Arc;

use anyhow::{Result, bail};
use triage_config::Config;
use triage_core::{EventBus, Notifier};
use triage_store::HttpStore;
use triage_workflow::{CaseMergeWorkflow, MergeOutcome};

use crate::cli::MergeArgs;
use crate::dialogs::{FlagDialogs, UrlNavigator};
use crate::notify::TracingNotifier;

pub async fn handle(args: MergeArgs, config: &Config) -> Result<()> {
    let store = Arc::new(HttpStore::new(
        &config.server.base_url,
        config.server.api_key.clone(),
    )?);

    let mut dialogs = FlagDialogs::new(store.clone());
    dialogs.template_name = args.template.clone();
    dialogs.new_case_title = args.title.clone();
    dialogs.case_target = args.case.clone();

    let navigator = UrlNavigator {
        base_url: config.server.base_url.clone(),
    };
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
    let workflow = CaseMergeWorkflow::new(
        store,
        Arc::new(dialogs),
        Arc::new(navigator),
        notifier,
        EventBus::default(),
    );

    let outcome = if args.new_case {
        workflow.create_new_case(&args.ids).await?
    } else if args.case.is_some() {
        workflow.merge_into_existing(&args.ids).await?
    } else {
        bail!("pass either --new --title <title> or --case <number-or-title>");
    };

    if outcome == MergeOutcome::Cancelled {
        bail!("merge target could not be resolved");
    }
    Ok(())
}
