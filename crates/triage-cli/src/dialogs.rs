//! Non-interactive workflow dialogs
//!
//! The CLI resolves each workflow step from flags instead of modals: the
//! template is matched by name, case creation uses the given title, and
//! the case picker runs one search and takes the first hit. A target that
//! cannot be resolved behaves like a dismissed dialog.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;
use triage_core::{Case, CaseDraft, CaseQuery, CaseTemplate, RemoteError};
use triage_store::{CaseStore, HttpStore};
use triage_workflow::{Choice, MergeDialogs, Navigator, search_cases};

pub struct FlagDialogs {
    store: Arc<HttpStore>,
    pub template_name: Option<String>,
    pub new_case_title: Option<String>,
    pub case_target: Option<String>,
}

impl FlagDialogs {
    pub fn new(store: Arc<HttpStore>) -> Self {
        Self {
            store,
            template_name: None,
            new_case_title: None,
            case_target: None,
        }
    }
}

#[async_trait]
impl MergeDialogs for FlagDialogs {
    async fn choose_template(
        &self,
        templates: Vec<CaseTemplate>,
    ) -> Result<Choice<Option<CaseTemplate>>, RemoteError> {
        match &self.template_name {
            None => Ok(Choice::Selected(None)),
            Some(name) => match templates.into_iter().find(|t| &t.name == name) {
                Some(template) => Ok(Choice::Selected(Some(template))),
                None => {
                    warn!(template = %name, "no such case template");
                    Ok(Choice::Cancelled)
                }
            },
        }
    }

    async fn create_case(
        &self,
        template: Option<CaseTemplate>,
    ) -> Result<Choice<Case>, RemoteError> {
        let Some(title) = &self.new_case_title else {
            return Ok(Choice::Cancelled);
        };
        let draft = CaseDraft {
            title: title.clone(),
            description: String::new(),
            severity: None,
            template: template.map(|t| t.name),
        };
        let case = self.store.create_case(&draft).await?;
        Ok(Choice::Selected(case))
    }

    async fn pick_case(&self) -> Result<Choice<Case>, RemoteError> {
        let Some(target) = &self.case_target else {
            return Ok(Choice::Cancelled);
        };
        let query = if target.chars().all(|c| c.is_ascii_digit()) {
            CaseQuery::ByNumber(target.clone())
        } else {
            CaseQuery::ByTitle(target.clone())
        };
        let mut found = search_cases(self.store.as_ref(), &query).await?;
        match found.drain(..).next() {
            Some(case) => Ok(Choice::Selected(case)),
            None => {
                warn!(case = %target, "no matching case");
                Ok(Choice::Cancelled)
            }
        }
    }
}

/// Prints the case location instead of navigating a view
pub struct UrlNavigator {
    pub base_url: String,
}

#[async_trait]
impl Navigator for UrlNavigator {
    async fn open_case(&self, case_id: &str) {
        println!("{}/cases/{}", self.base_url.trim_end_matches('/'), case_id);
    }
}
