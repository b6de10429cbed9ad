//! Paged alert list
//!
//! Owns the fetched page, sort, page size, and selection for the triage
//! view. Any filter, sort, or page-size change triggers a refetch; the
//! fetched page always wholesale-replaces the previous one. Responses that
//! were superseded by a newer refresh are discarded, so the view never
//! shows stale results regardless of arrival order.

pub mod list;

pub use list::{AlertList, Phase, RefreshOutcome};
