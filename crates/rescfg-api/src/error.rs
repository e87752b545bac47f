//! Error types for the marketplace HTTP adapter

use rescfg_core::RemoteError;
use thiserror::Error;

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors from marketplace API calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server rejected the request as malformed (HTTP 400)
    #[error("HTTP {status}: {message}")]
    BadRequest { status: u16, message: String },

    /// Any other non-success status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Connection, timeout or body decoding failure
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Base URL cannot carry a resource path
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ApiError> for RemoteError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::BadRequest { .. } => RemoteError::bad_request(err.to_string()),
            other => RemoteError::other(other.to_string()),
        }
    }
}
