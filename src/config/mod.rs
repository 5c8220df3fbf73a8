//! Engine configuration: TOML file loading, defaults and validation.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, HealthConfig, PagingConfig, ProviderConfig, QueryConfig, SortConfig};
