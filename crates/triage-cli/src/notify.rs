//! Tracing-backed notifier

use tracing::{error, info};
use triage_core::{Notifier, RemoteError};

/// Routes engine notifications to the log; the CLI has no toast surface
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!("{}", message);
    }

    fn error(&self, origin: &str, err: &RemoteError) {
        error!(origin, "{}", err);
    }
}
