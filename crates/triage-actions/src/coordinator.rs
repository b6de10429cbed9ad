//! Bulk-action coordinator

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::info;
use triage_core::{AlertSummary, Notifier, RemoteError};
use triage_list::AlertList;
use triage_select::can_mark_as_read;
use triage_store::AlertStore;

use crate::error::{ActionError, Result};

const ORIGIN: &str = "alert-list";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Follow,
    Unfollow,
    MarkAsRead,
    MarkAsUnread,
    Delete,
}

impl BulkAction {
    fn past_tense(self) -> &'static str {
        match self {
            BulkAction::Follow => "followed",
            BulkAction::Unfollow => "unfollowed",
            BulkAction::MarkAsRead => "marked as read",
            BulkAction::MarkAsUnread => "marked as unread",
            BulkAction::Delete => "deleted",
        }
    }

    fn success_message(self, count: usize) -> String {
        if count == 1 {
            format!("1 alert has been {}", self.past_tense())
        } else {
            format!("{} alerts have been {}", count, self.past_tense())
        }
    }
}

pub struct Coordinator<S: AlertStore> {
    store: Arc<S>,
    list: Arc<AlertList<S>>,
    notifier: Arc<dyn Notifier>,
}

impl<S: AlertStore> Coordinator<S> {
    pub fn new(store: Arc<S>, list: Arc<AlertList<S>>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            list,
            notifier,
        }
    }

    /// Apply one action to all ids and report a single aggregate outcome.
    ///
    /// Follow/unfollow and read-state changes fan out one request per id;
    /// delete is a single bulk call. Either way all requests are awaited,
    /// any failure fails the aggregate with the first failing response,
    /// and already-applied effects stay applied.
    pub async fn bulk_apply(&self, action: BulkAction, ids: &[String]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let results: Vec<std::result::Result<(), RemoteError>> = match action {
            BulkAction::Delete => vec![self.store.bulk_remove(ids).await],
            BulkAction::Follow => join_all(ids.iter().map(|id| self.store.follow(id))).await,
            BulkAction::Unfollow => join_all(ids.iter().map(|id| self.store.unfollow(id))).await,
            BulkAction::MarkAsRead => {
                join_all(ids.iter().map(|id| self.store.mark_as_read(id))).await
            }
            BulkAction::MarkAsUnread => {
                join_all(ids.iter().map(|id| self.store.mark_as_unread(id))).await
            }
        };

        let total = ids.len();
        let mut failures = results.into_iter().filter_map(std::result::Result::err);
        if let Some(first) = failures.next() {
            let failed = 1 + failures.count();
            self.notifier.error(ORIGIN, &first);
            return Err(ActionError::Partial {
                action,
                failed,
                total,
                first,
            });
        }

        info!(?action, count = total, "bulk action applied");
        self.notifier.success(&action.success_message(total));
        if let Err(err) = self.list.refresh().await {
            self.notifier.error(ORIGIN, &err);
        }
        Ok(())
    }

    /// Follow or unfollow the whole selection
    pub async fn bulk_follow(&self, follow: bool, selection: &[AlertSummary]) -> Result<()> {
        let ids = ids_of(selection);
        let action = if follow {
            BulkAction::Follow
        } else {
            BulkAction::Unfollow
        };
        self.bulk_apply(action, &ids).await
    }

    /// Mark the whole selection read or unread.
    ///
    /// The direction for the whole batch is decided from the first selected
    /// alert's eligibility only, as the source behavior does; with a
    /// heterogeneous selection this can fan out the wrong direction for
    /// some items.
    pub async fn bulk_mark_as_read(&self, read: bool, selection: &[AlertSummary]) -> Result<()> {
        let ids = ids_of(selection);
        let mark_read = read && selection.first().is_some_and(can_mark_as_read);
        let action = if mark_read {
            BulkAction::MarkAsRead
        } else {
            BulkAction::MarkAsUnread
        };
        self.bulk_apply(action, &ids).await
    }

    pub async fn bulk_delete(&self, selection: &[AlertSummary]) -> Result<()> {
        self.bulk_apply(BulkAction::Delete, &ids_of(selection)).await
    }

    /// Row-level follow toggle; direction comes from the alert itself
    pub async fn toggle_follow(&self, alert: &AlertSummary) -> Result<()> {
        let result = if alert.follow {
            self.store.unfollow(&alert.id).await
        } else {
            self.store.follow(&alert.id).await
        };
        self.surface(result)
    }

    /// Row-level read toggle; eligible alerts are marked read, the rest
    /// are marked unread
    pub async fn toggle_read(&self, alert: &AlertSummary) -> Result<()> {
        let result = if can_mark_as_read(alert) {
            self.store.mark_as_read(&alert.id).await
        } else {
            self.store.mark_as_unread(&alert.id).await
        };
        self.surface(result)
    }

    fn surface(&self, result: std::result::Result<(), RemoteError>) -> Result<()> {
        if let Err(err) = &result {
            self.notifier.error(ORIGIN, err);
        }
        result.map_err(ActionError::from)
    }
}

fn ids_of(selection: &[AlertSummary]) -> Vec<String> {
    selection.iter().map(|a| a.id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_wording() {
        assert_eq!(
            BulkAction::Follow.success_message(1),
            "1 alert has been followed"
        );
        assert_eq!(
            BulkAction::MarkAsUnread.success_message(3),
            "3 alerts have been marked as unread"
        );
        assert_eq!(
            BulkAction::Delete.success_message(2),
            "2 alerts have been deleted"
        );
    }
}
