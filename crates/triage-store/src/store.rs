//! Store traits

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use triage_core::{AlertPage, Case, CaseDraft, CaseQuery, CaseTemplate, RemoteError};

/// Parameters of one list fetch.
///
/// `filter` is the serialized query expression, empty when unfiltered.
/// `sort` entries are `+field` / `-field`. The list view always pages, so
/// `load_all` stays false there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub filter: String,
    pub sort: Vec<String>,
    pub page_size: u32,
    pub load_all: bool,
}

impl SearchRequest {
    pub fn new(filter: impl Into<String>, sort: Vec<String>, page_size: u32) -> Self {
        Self {
            filter: filter.into(),
            sort,
            page_size,
            load_all: false,
        }
    }
}

/// Alert operations of the remote store.
///
/// Follow/unfollow and read-state changes are per-alert endpoints; removal
/// and merge are bulk endpoints carrying the whole id list. The coordinator
/// preserves that asymmetry.
#[async_trait]
pub trait AlertStore: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<AlertPage, RemoteError>;

    async fn follow(&self, id: &str) -> Result<(), RemoteError>;

    async fn unfollow(&self, id: &str) -> Result<(), RemoteError>;

    async fn mark_as_read(&self, id: &str) -> Result<(), RemoteError>;

    async fn mark_as_unread(&self, id: &str) -> Result<(), RemoteError>;

    async fn bulk_remove(&self, ids: &[String]) -> Result<(), RemoteError>;

    /// Merge alerts into a case; returns the id of the target case
    async fn bulk_merge_into(&self, ids: &[String], case_id: &str) -> Result<String, RemoteError>;
}

/// Case operations needed by the merge workflows
#[async_trait]
pub trait CaseStore: Send + Sync {
    async fn case_templates(&self) -> Result<Vec<CaseTemplate>, RemoteError>;

    async fn create_case(&self, draft: &CaseDraft) -> Result<Case, RemoteError>;

    async fn find_cases(&self, query: &CaseQuery) -> Result<Vec<Case>, RemoteError>;
}
