//! Upstream search provider boundary.
//!
//! The engine only ever talks to the provider through [`SearchProvider`];
//! [`HttpProvider`] is the production implementation.

mod client;
mod error;
mod types;

use async_trait::async_trait;

pub use client::HttpProvider;
pub use error::ProviderError;
pub use types::{Card, Prices, ProviderPage, ProviderRequest, ProviderSort};

/// A paginated, read-only card search service.
///
/// Calls are idempotent and side-effect free, so a response that is no
/// longer wanted can simply be dropped when it arrives.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns the name of this provider for logging.
    fn name(&self) -> &'static str;

    /// Fetch one provider page.
    async fn search(&self, request: &ProviderRequest) -> Result<ProviderPage, ProviderError>;
}
