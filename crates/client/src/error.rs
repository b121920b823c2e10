//! Client error types.

use domain::DomainError;
use thiserror::Error;

use crate::wire::ErrorBody;

/// Errors returned by [`OrderApi`](crate::OrderApi) calls.
///
/// Failures are split by cause so callers can tell a rejected request (4xx)
/// apart from a backend or connectivity problem worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The backend could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend has no such resource (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend rejected the request (4xx other than 404).
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The backend failed while handling the request (5xx).
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The configured base URL is not usable.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// The request could not be built from the given domain values.
    #[error("Invalid request: {0}")]
    Domain(#[from] DomainError),
}

impl ClientError {
    /// Returns true if repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Timeout | ClientError::Network(_) | ClientError::Server { .. }
        )
    }

    /// Maps a non-success HTTP status and its body to an error.
    ///
    /// The backend reports failures as `{"error": "..."}`; other bodies are
    /// used verbatim.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| body.trim().to_string());

        match status {
            404 => ClientError::NotFound(message),
            400..=499 => ClientError::Rejected { status, message },
            _ => ClientError::Server { status, message },
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if err.is_builder() {
            ClientError::InvalidUrl(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
