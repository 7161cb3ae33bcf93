//! Errors returned by the storefront API client.

use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
///
/// Non-2xx responses carry a human-readable message extracted from the error
/// body; malformed response payloads are absorbed by the normalizers and do
/// not surface here.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API returned a non-2xx status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body, or a generic fallback.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// No stored token for an operation that requires authentication.
    ///
    /// Raised before any network I/O.
    #[error("Not authenticated")]
    Unauthenticated,

    /// A success response was missing a field the operation cannot proceed
    /// without.
    #[error("Response missing required field: {0}")]
    MissingField(&'static str),
}

impl ApiError {
    /// Whether a single retry may succeed.
    ///
    /// Transport failures and 5xx responses are retryable; client errors and
    /// local precondition failures are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
