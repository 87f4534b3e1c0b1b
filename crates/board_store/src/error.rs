//! Error types for remote document store access

use board_model::ModelError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the remote store.
///
/// Every variant belongs to one of two kinds: transport failures (the request
/// did not complete with a success status) and malformed responses (the
/// payload did not have the expected shape).
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Network unreachable, connection reset, request could not be built
    #[error("Transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The request did not complete in time
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// The payload is missing the expected shape or breaks document invariants
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The store is not configured correctly
    #[error("Invalid store configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// Timeout after `limit`, saturating at `u64::MAX` milliseconds
    pub fn timeout(limit: Duration) -> Self {
        StoreError::Timeout(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX))
    }

    /// Whether this is a transport-level failure
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            StoreError::Transport(_) | StoreError::Status { .. } | StoreError::Timeout(_)
        )
    }

    /// Whether the response payload was unusable
    pub fn is_malformed(&self) -> bool {
        matches!(self, StoreError::Malformed(_))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Malformed(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Malformed(err.to_string())
    }
}

impl From<ModelError> for StoreError {
    fn from(err: ModelError) -> Self {
        StoreError::Malformed(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
