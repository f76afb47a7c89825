//! Sync engine error types.

use thiserror::Error;
use uuid::Uuid;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while talking to the POS system or the local store.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Missing or invalid credentials. Surfaced on the first remote call,
    /// never at construction.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Non-success response from the POS API.
    #[error("POS API returned {status}: {body}")]
    RemoteApi { status: u16, body: String },

    /// Network-level failure before a response was obtained.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Local record does not exist.
    #[error("local record not found: {0}")]
    NotFound(Uuid),

    /// Reserved for future mapper validation; the mapper is total today.
    #[error("mapping error: {0}")]
    Mapping(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure in the primary record store collaborator.
    #[error("store error: {0}")]
    Store(String),
}

impl SyncError {
    /// Returns true if the caller may reasonably retry the operation.
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Transport(_) => true,
            SyncError::RemoteApi { status, .. } => {
                *status == 429 || *status >= 500
            }
            _ => false,
        }
    }
}
