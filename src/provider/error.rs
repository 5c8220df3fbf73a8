//! Error types for upstream search calls.
//!
//! Distinguishes transport-level failures from provider rejections so the
//! engine can surface the latter as a programming error rather than a
//! transient outage.

use thiserror::Error;

/// Errors that can occur while querying the search provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Failed to reach the provider
    #[error("Connection to search provider failed: {source}")]
    Connection {
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded total timeout
    #[error("Search request timed out after {duration}s")]
    Timeout { duration: u64 },

    /// Provider refused the query or page (malformed query, page out of range)
    #[error("Provider rejected request ({status} {code}): {details}")]
    Rejected {
        status: u16,
        code: String,
        details: String,
    },

    /// Provider returned a non-success status that is not a rejection
    #[error("Upstream error: {status} - {message}")]
    Upstream { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode provider response: {0}")]
    Decode(String),

    /// Client could not be built or the request could not be formed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// True when the provider understood the request and refused it.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ProviderError::Rejected { .. })
    }

    /// Get error type string for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            ProviderError::Connection { .. } => "connection_error",
            ProviderError::Timeout { .. } => "request_timeout",
            ProviderError::Rejected { .. } => "provider_rejected",
            ProviderError::Upstream { .. } => "upstream_error",
            ProviderError::Decode(_) => "decode_error",
            ProviderError::InvalidRequest(_) => "invalid_request",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_classification() {
        let err = ProviderError::Rejected {
            status: 422,
            code: "bad_request".to_string(),
            details: "page out of range".to_string(),
        };
        assert!(err.is_rejection());
        assert_eq!(err.error_type(), "provider_rejected");
    }

    #[test]
    fn test_timeout_is_not_rejection() {
        let err = ProviderError::Timeout { duration: 10 };
        assert!(!err.is_rejection());
        assert_eq!(err.error_type(), "request_timeout");
        assert_eq!(err.to_string(), "Search request timed out after 10s");
    }

    #[test]
    fn test_upstream_message_format() {
        let err = ProviderError::Upstream {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Upstream error: 503 - maintenance");
    }
}
