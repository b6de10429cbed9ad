//! The merge pipelines

use std::sync::Arc;

use tracing::info;
use triage_core::{AlertEvent, CaseQuery, EventBus, Notifier, RemoteError};
use triage_store::{AlertStore, CaseStore};

use crate::dialogs::{Choice, MergeDialogs, Navigator};
use crate::error::{Result, WorkflowError};

const ORIGIN: &str = "case-merge";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Merged { case_id: String },
    /// The user dismissed a step; nothing was merged and nothing reported
    Cancelled,
}

pub struct CaseMergeWorkflow<S> {
    store: Arc<S>,
    dialogs: Arc<dyn MergeDialogs>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    events: EventBus,
}

impl<S> CaseMergeWorkflow<S>
where
    S: AlertStore + CaseStore,
{
    pub fn new(
        store: Arc<S>,
        dialogs: Arc<dyn MergeDialogs>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        events: EventBus,
    ) -> Self {
        Self {
            store,
            dialogs,
            navigator,
            notifier,
            events,
        }
    }

    /// Create-new-case path: templates -> choice (skipped when none
    /// exist) -> case creation -> merge.
    pub async fn create_new_case(&self, alert_ids: &[String]) -> Result<MergeOutcome> {
        let result = self.run_create(alert_ids).await;
        self.surface(result)
    }

    /// Merge-into-existing path: case picker -> merge
    pub async fn merge_into_existing(&self, alert_ids: &[String]) -> Result<MergeOutcome> {
        let result = self.run_existing(alert_ids).await;
        self.surface(result)
    }

    async fn run_create(&self, alert_ids: &[String]) -> Result<MergeOutcome> {
        let templates = self.store.case_templates().await?;

        let template = if templates.is_empty() {
            None
        } else {
            match self.dialogs.choose_template(templates).await? {
                Choice::Cancelled => return Ok(MergeOutcome::Cancelled),
                Choice::Selected(template) => template,
            }
        };

        let case = match self.dialogs.create_case(template).await? {
            Choice::Cancelled => return Ok(MergeOutcome::Cancelled),
            Choice::Selected(case) => case,
        };
        self.notifier.success("New case has been created");

        self.merge_tail(alert_ids, &case.id).await
    }

    async fn run_existing(&self, alert_ids: &[String]) -> Result<MergeOutcome> {
        let case = match self.dialogs.pick_case().await? {
            Choice::Cancelled => return Ok(MergeOutcome::Cancelled),
            Choice::Selected(case) => case,
        };
        self.merge_tail(alert_ids, &case.id).await
    }

    async fn merge_tail(&self, alert_ids: &[String], case_id: &str) -> Result<MergeOutcome> {
        let merged_id = self.store.bulk_merge_into(alert_ids, case_id).await?;

        info!(case_id = %merged_id, count = alert_ids.len(), "alerts merged into case");
        if alert_ids.len() == 1 {
            self.notifier
                .success("1 alert has been merged into the case");
        } else {
            self.notifier.success(&format!(
                "{} alerts have been merged into the case",
                alert_ids.len()
            ));
        }

        self.events.emit(AlertEvent::Imported);
        self.navigator.open_case(&merged_id).await;

        Ok(MergeOutcome::Merged { case_id: merged_id })
    }

    /// Report remote failures once, at the end of the pipeline;
    /// cancellation never reaches here as an error.
    fn surface(&self, result: Result<MergeOutcome>) -> Result<MergeOutcome> {
        if let Err(WorkflowError::Remote(err)) = &result {
            self.notifier.error(ORIGIN, err);
        }
        result
    }
}

/// Case search used by picker implementations. Input below the per-mode
/// minimum (3 characters by title, 1 by number) resolves to no results
/// without a remote call.
pub async fn search_cases<S: CaseStore>(
    store: &S,
    query: &CaseQuery,
) -> std::result::Result<Vec<triage_core::Case>, RemoteError> {
    if !query.validate() {
        return Ok(Vec::new());
    }
    store.find_cases(query).await
}
