//! List state machine

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;
use triage_core::{AlertSummary, RemoteError};
use triage_select::{MenuState, derive_menu};
use triage_store::{AlertStore, SearchRequest};

/// Fetch lifecycle. A failed refresh reports its error and falls back to
/// `Idle` with the previous page content retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
}

/// What a refresh call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Response applied; the page was replaced
    Applied,
    /// The query serialized identically to the last submitted one; no fetch
    Unchanged,
    /// A newer refresh was issued while this one was in flight; the
    /// response was discarded
    Superseded,
}

struct ListState {
    values: Vec<AlertSummary>,
    total: u64,
    phase: Phase,
    query: String,
    /// Last query whose fetch succeeded; diffed against to suppress
    /// refreshes for no-op filter edits
    last_submitted: Option<String>,
    sort: Vec<String>,
    page_size: u32,
    menu: MenuState,
}

pub struct AlertList<S: AlertStore> {
    store: Arc<S>,
    state: RwLock<ListState>,
    seq: AtomicU64,
}

impl<S: AlertStore> AlertList<S> {
    pub fn new(store: Arc<S>, sort: Vec<String>, page_size: u32) -> Self {
        Self {
            store,
            state: RwLock::new(ListState {
                values: Vec::new(),
                total: 0,
                phase: Phase::Idle,
                query: String::new(),
                last_submitted: None,
                sort,
                page_size,
                menu: MenuState::default(),
            }),
            seq: AtomicU64::new(0),
        }
    }

    /// Fetch with the current query, sort, and page size.
    ///
    /// Every refresh takes a ticket from a monotonic sequence; a response
    /// is only applied while its ticket is still the newest, so a refresh
    /// raced by a later one resolves to `Superseded` without touching the
    /// view.
    pub async fn refresh(&self) -> Result<RefreshOutcome, RemoteError> {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let request = {
            let mut state = self.state.write().await;
            state.phase = Phase::Loading;
            SearchRequest::new(state.query.clone(), state.sort.clone(), state.page_size)
        };

        let result = self.store.search(&request).await;

        let mut state = self.state.write().await;
        if self.seq.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "discarding superseded list response");
            return Ok(RefreshOutcome::Superseded);
        }

        match result {
            Ok(page) => {
                state.values = page.values;
                state.total = page.total;
                state.last_submitted = Some(request.filter);
                state.phase = Phase::Ready;
                Self::reset_selection_locked(&mut state);
                Ok(RefreshOutcome::Applied)
            }
            Err(err) => {
                // previous page content stays visible
                state.phase = Phase::Idle;
                Err(err)
            }
        }
    }

    /// Submit a newly serialized query. An expression identical to the last
    /// successfully submitted one does not refetch.
    pub async fn submit_query(&self, query: &str) -> Result<RefreshOutcome, RemoteError> {
        {
            let mut state = self.state.write().await;
            if state.last_submitted.as_deref() == Some(query) {
                return Ok(RefreshOutcome::Unchanged);
            }
            state.query = query.to_string();
        }
        self.refresh().await
    }

    /// Column-header sort: same field toggles direction, a different field
    /// starts ascending.
    pub async fn sort_by_field(&self, field: &str) -> Result<RefreshOutcome, RemoteError> {
        {
            let mut state = self.state.write().await;
            let current = state.sort.first().cloned().unwrap_or_default();
            let ascending = format!("+{}", field);
            let next = if current.strip_prefix(['+', '-']).unwrap_or(&current) != field {
                ascending
            } else if current == ascending {
                format!("-{}", field)
            } else {
                ascending
            };
            state.sort = vec![next];
        }
        self.refresh().await
    }

    pub async fn set_sort(&self, sort: Vec<String>) -> Result<RefreshOutcome, RemoteError> {
        self.state.write().await.sort = sort;
        self.refresh().await
    }

    pub async fn set_page_size(&self, page_size: u32) -> Result<RefreshOutcome, RemoteError> {
        self.state.write().await.page_size = page_size;
        self.refresh().await
    }

    /// Toggle one row; returns the recomputed menu
    pub async fn select(&self, id: &str, selected: bool) -> MenuState {
        let mut state = self.state.write().await;
        if let Some(alert) = state.values.iter_mut().find(|a| a.id == id) {
            alert.selected = selected;
        }
        Self::recompute_menu_locked(&mut state)
    }

    /// Header checkbox: select or deselect the loaded page. Page-scoped;
    /// the flag re-selects the fresh page after a refresh.
    pub async fn set_select_all(&self, select_all: bool) -> MenuState {
        let mut state = self.state.write().await;
        state.menu.select_all = select_all;
        for alert in &mut state.values {
            alert.selected = select_all;
        }
        Self::recompute_menu_locked(&mut state)
    }

    pub async fn reset_selection(&self) -> MenuState {
        let mut state = self.state.write().await;
        Self::reset_selection_locked(&mut state);
        state.menu
    }

    fn reset_selection_locked(state: &mut ListState) {
        let select_all = state.menu.select_all;
        for alert in &mut state.values {
            alert.selected = select_all;
        }
        Self::recompute_menu_locked(state);
    }

    fn recompute_menu_locked(state: &mut ListState) -> MenuState {
        let selection: Vec<AlertSummary> =
            state.values.iter().filter(|a| a.selected).cloned().collect();
        let mut menu = derive_menu(&selection);
        menu.select_all = state.menu.select_all;
        state.menu = menu;
        menu
    }

    /// The selected subsequence of the loaded page
    pub async fn selection(&self) -> Vec<AlertSummary> {
        self.state
            .read()
            .await
            .values
            .iter()
            .filter(|a| a.selected)
            .cloned()
            .collect()
    }

    pub async fn selected_ids(&self) -> Vec<String> {
        self.selection().await.into_iter().map(|a| a.id).collect()
    }

    pub async fn values(&self) -> Vec<AlertSummary> {
        self.state.read().await.values.clone()
    }

    pub async fn menu(&self) -> MenuState {
        self.state.read().await.menu
    }

    pub async fn phase(&self) -> Phase {
        self.state.read().await.phase
    }

    pub async fn total(&self) -> u64 {
        self.state.read().await.total
    }

    pub async fn sort(&self) -> Vec<String> {
        self.state.read().await.sort.clone()
    }

    pub async fn page_size(&self) -> u32 {
        self.state.read().await.page_size
    }
}
