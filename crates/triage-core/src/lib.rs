//! Core domain models and boundaries for triage
//!
//! This crate contains:
//! - Domain models (AlertSummary, Case, Severity)
//! - The shared remote-failure shape (RemoteError)
//! - Notification and domain-event boundaries

pub mod alert;
pub mod case;
pub mod error;
pub mod event;
pub mod notify;
pub mod severity;

pub use alert::{AlertPage, AlertStatus, AlertSummary};
pub use case::{Case, CaseDraft, CaseQuery, CaseTemplate};
pub use error::RemoteError;
pub use event::{AlertEvent, EventBus};
pub use notify::{Notifier, NullNotifier};
pub use severity::Severity;
