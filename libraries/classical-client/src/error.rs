//! Error types for the discography and tracker clients.

use thiserror::Error;

/// Errors returned by [`RateLimiter::wait`](crate::RateLimiter::wait).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitError {
    /// The cancellation token fired while waiting for a slot
    #[error("Rate limiter wait cancelled")]
    Cancelled,
}

/// Errors that can occur when talking to remote services.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Http { status: u16, message: String },

    /// Tracker envelope did not report success
    #[error("API error: {0}")]
    Api(String),

    /// Response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Request cannot be built from the given data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The operation was cancelled
    #[error("Operation cancelled")]
    Cancelled,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// External program failed
    #[error("Subprocess failed: {0}")]
    Subprocess(String),
}

impl From<RateLimitError> for ClientError {
    fn from(_: RateLimitError) -> Self {
        ClientError::Cancelled
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Parse(e.to_string())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
