//! Error handling for barcode lookups
//!
//! Every error is scoped to a single barcode and never aborts the batch
//! it belongs to; the dispatcher collects failures alongside successes.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for lookup operations
pub type Result<T> = std::result::Result<T, LookupError>;

/// Error raised while resolving a single barcode
#[derive(Error, Debug, Clone)]
pub enum LookupError {
    /// No response arrived within the per-request timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered with a non-2xx status
    #[error("HTTP error: status {status}: {message}")]
    Http {
        /// Status code returned by the endpoint
        status: u16,
        /// Body snippet or status reason
        message: String,
    },

    /// Connection-level failure (DNS, TLS, refused, reset)
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be parsed as the expected JSON array
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Anything not covered by the variants above
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Kind discriminant for [`LookupError`], used when reporting batches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request timed out
    Timeout,
    /// Non-2xx HTTP status
    Http,
    /// Transport-level failure
    Network,
    /// Unparseable response body
    Malformed,
    /// Unclassified failure
    Unexpected,
}

impl LookupError {
    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::Timeout(_) => ErrorKind::Timeout,
            LookupError::Http { .. } => ErrorKind::Http,
            LookupError::Network(_) => ErrorKind::Network,
            LookupError::MalformedResponse(_) => ErrorKind::Malformed,
            LookupError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Whether this error is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, LookupError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            LookupError::Timeout(Duration::from_secs(10)).kind(),
            ErrorKind::Timeout
        );
        assert_eq!(
            LookupError::Http {
                status: 500,
                message: "oops".to_string()
            }
            .kind(),
            ErrorKind::Http
        );
        assert_eq!(
            LookupError::Network("refused".to_string()).kind(),
            ErrorKind::Network
        );
        assert_eq!(
            LookupError::MalformedResponse("not json".to_string()).kind(),
            ErrorKind::Malformed
        );
        assert_eq!(
            LookupError::Unexpected("?".to_string()).kind(),
            ErrorKind::Unexpected
        );
    }

    #[test]
    fn test_timeout_message_is_distinguishable() {
        let err = LookupError::Timeout(Duration::from_secs(10));
        assert!(err.to_string().contains("timed out"));
        assert!(err.is_timeout());

        let err = LookupError::Http {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(!err.is_timeout());
    }
}
