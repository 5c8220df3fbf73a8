//! Paginated, sortable card search over a remote catalog provider.
//!
//! [`SearchEngine`] turns search, load-more and sort actions into provider
//! requests, buffers provider pages into display batches, and keeps late or
//! out-of-order responses from overwriting newer results.

pub mod config;
pub mod engine;
pub mod error;
pub mod health;
pub mod logging;
pub mod mvi;
pub mod pagination;
pub mod provider;
pub mod query;
pub mod sequencer;
pub mod sort;

pub use config::{Config, ConfigError};
pub use engine::{Outcome, SearchEngine, SearchView};
pub use error::SearchError;
pub use provider::{Card, HttpProvider, ProviderError, SearchProvider};
pub use query::SearchFilters;
pub use sort::{SortCriterion, SortDirection, SortState};
