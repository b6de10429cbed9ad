//! Bulk actions over the current selection
//!
//! Fans an action out over the selected alert ids as independent requests
//! (or one bulk request where the backend offers one), waits for all of
//! them, and reports a single aggregate outcome. Partial effects are never
//! rolled back; at-least-once, not exactly-once.

pub mod coordinator;
pub mod error;

pub use coordinator::{BulkAction, Coordinator};
pub use error::{ActionError, Result};
