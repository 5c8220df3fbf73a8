//! Provider query construction from free text and structured filters.

mod builder;
mod filters;

pub use builder::{is_scoped, QueryBuilder};
pub use filters::{Color, ColorMatch, Comparison, ManaValueFilter, SearchFilters};
