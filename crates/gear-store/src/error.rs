//! Store error types.

use thiserror::Error;

/// Errors that can occur while persisting or fetching cart state.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Local file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// (De)serialization failed.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Non-2xx HTTP response without a parseable envelope.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The service envelope reported failure.
    #[error("API error: {0}")]
    Api(String),

    /// The order service rejected the submission.
    #[error("Order validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Request could not be sent.
    #[error("Request failed: {0}")]
    Request(String),

    /// The operation requires an authenticated customer.
    #[error("Not authenticated")]
    NotAuthenticated,
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            StoreError::Timeout
        } else {
            StoreError::Request(e.to_string())
        }
    }
}
