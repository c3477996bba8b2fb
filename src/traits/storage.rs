//! Session token persistence trait.

use thiserror::Error;

/// Token storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No location to store the token (e.g. no home directory).
    #[error("No storage location available: {0}")]
    Unavailable(String),
}

/// Where the session token lives between process runs.
///
/// Only the token is persisted; everything else is re-fetched from the
/// server.
pub trait TokenStorage: Send + Sync {
    /// Load the stored token, `Ok(None)` when nothing is stored.
    fn load(&self) -> Result<Option<String>, StorageError>;

    fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Remove the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StorageError>;
}
