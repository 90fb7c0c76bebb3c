//! Error types for console API operations.
//!
//! These are mapped to core port errors at the port boundary.

use thiserror::Error;

/// Result type alias for console API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors related to console API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// API request failed with an HTTP error status.
    #[error("Console API request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The base URL cannot have path segments appended (e.g. `mailto:`).
    #[error("Base URL cannot be used for API requests: {url}")]
    UnusableBaseUrl {
        /// The rejected URL
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_error_message() {
        let error = ApiError::RequestFailed {
            status: 502,
            url: "http://127.0.0.1:8080/api/console/1/tail".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("/console/1/tail"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let error: ApiError = parse.into();
        assert!(matches!(error, ApiError::JsonParse(_)));
    }
}
