//! Sync error types.

use thiserror::Error;

/// Failures a sync operation can hit before reaching the store.
///
/// None of these cross the service boundary as a `Result`; each one is
/// rendered into the store's error string.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The collection answered with a status outside the operation's
    /// success condition.
    #[error("error: {status} {text}")]
    Status { status: u16, text: String },

    /// The request never completed (connection refused, DNS failure, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl SyncError {
    /// Builds the status variant from a response status, carrying the
    /// numeric code and the canonical status text.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        SyncError::Status {
            status: status.as_u16(),
            text: status.canonical_reason().unwrap_or("").to_string(),
        }
    }
}
