//! HTTP client error types.

use thiserror::Error;

/// Result type for HTTP client operations.
pub type Result<T> = std::result::Result<T, HttpClientError>;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The method string is not a valid HTTP method token.
    #[error("Invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    /// A header name or value cannot be sent.
    #[error("Invalid header {name:?}: {message}")]
    InvalidHeader {
        /// Header name as given.
        name: String,
        /// Why it was rejected.
        message: String,
    },

    /// The response arrived but its body is not the expected JSON.
    #[error("Failed to decode response body (status {status}): {source}")]
    Json {
        /// HTTP status code of the response.
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Building the client, sending, or reading the body failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl HttpClientError {
    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// The HTTP status code, when a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Json { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_keeps_status() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = HttpClientError::Json { status: 502, source };
        assert_eq!(err.status_code(), Some(502));
        assert!(err.to_string().starts_with("Failed to decode response body (status 502)"));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_request_errors_have_no_status() {
        assert_eq!(HttpClientError::InvalidMethod("GE T".into()).status_code(), None);
        let err = HttpClientError::InvalidHeader {
            name: "X-Bad".into(),
            message: "invalid value".into(),
        };
        assert_eq!(err.to_string(), "Invalid header \"X-Bad\": invalid value");
    }
}
