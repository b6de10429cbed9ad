use thiserror::Error;
use triage_core::RemoteError;

use crate::coordinator::BulkAction;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// One aggregate failure per bulk call, carrying the first failing
    /// response. Sub-requests that succeeded stay applied.
    #[error("bulk {action:?} failed for {failed} of {total} alerts: {first}")]
    Partial {
        action: BulkAction,
        failed: usize,
        total: usize,
        #[source]
        first: RemoteError,
    },
}

pub type Result<T> = std::result::Result<T, ActionError>;
