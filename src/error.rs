//! User-visible search errors.

use thiserror::Error;

use crate::provider::ProviderError;

/// Error shown to the user for the current search.
///
/// Cloneable so it can live in the observable state; the underlying
/// provider error is flattened to its message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The provider could not be reached or answered with a failure.
    #[error("Search failed: {message}")]
    Transport { message: String },

    /// The provider refused the request. Never expected in normal operation.
    #[error("Search provider rejected the request: {message}")]
    Rejected { message: String },
}

impl SearchError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, SearchError::Rejected { .. })
    }
}

impl From<&ProviderError> for SearchError {
    fn from(err: &ProviderError) -> Self {
        if err.is_rejection() {
            SearchError::Rejected {
                message: err.to_string(),
            }
        } else {
            SearchError::Transport {
                message: err.to_string(),
            }
        }
    }
}
