//! Sort criteria, the local-versus-remote sort policy and local comparators.

mod criterion;
mod local;
mod policy;

pub use criterion::{SortCriterion, SortDirection, SortState};
pub use local::{compare, sort_local};
pub use policy::{SortDecision, SortPolicy};
