//! Faceted filtering for the alert queue
//!
//! This crate contains:
//! - The facet catalogue (FilterRegistry) with per-facet kinds and
//!   conversion rules
//! - Active-filter state with deterministic query serialization
//! - The filter model (Filtering) that persists its view context across
//!   navigation

pub mod definition;
pub mod error;
pub mod filtering;
pub mod query;
pub mod value;

pub use definition::{FilterDefinition, FilterKind, FilterRegistry, TextRender};
pub use error::{FilterError, Result};
pub use filtering::{Filtering, ViewContext};
pub use query::build_query;
pub use value::{ActiveFilter, DateRange, FilterValue, Term};
