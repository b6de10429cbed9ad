//! Workflow step boundaries
//!
//! Modal presentation is out of scope; the pipeline only needs each step's
//! outcome. Dismissing a dialog is a value (`Choice::Cancelled`), not an
//! error — the pipeline must tell the two apart because cancellation is
//! swallowed while remote failures are reported.

use async_trait::async_trait;
use triage_core::{Case, CaseTemplate, RemoteError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    Selected(T),
    Cancelled,
}

impl<T> Choice<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Choice::Cancelled)
    }
}

#[async_trait]
pub trait MergeDialogs: Send + Sync {
    /// Template choice step. `Selected(None)` proceeds without a template.
    async fn choose_template(
        &self,
        templates: Vec<CaseTemplate>,
    ) -> Result<Choice<Option<CaseTemplate>>, RemoteError>;

    /// Case-creation step. The returned case has already been created by
    /// the dialog, so it is never rolled back if the merge after it fails.
    async fn create_case(&self, template: Option<CaseTemplate>) -> Result<Choice<Case>, RemoteError>;

    /// Case-picker step, backed by title or number search
    async fn pick_case(&self) -> Result<Choice<Case>, RemoteError>;
}

#[async_trait]
pub trait Navigator: Send + Sync {
    /// Show the detail view of a case
    async fn open_case(&self, case_id: &str);
}
