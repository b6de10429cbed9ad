//! Remote store boundary for triage
//!
//! The alert/case store is an external collaborator; this crate owns the
//! boundary traits plus two implementations: an HTTP client for a real
//! server and an in-memory store with failure and latency injection used
//! by tests and demos.

pub mod http;
pub mod memory;
pub mod store;

pub use http::HttpStore;
pub use memory::MemoryStore;
pub use store::{AlertStore, CaseStore, SearchRequest};
