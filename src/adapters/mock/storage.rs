//! In-memory token storage for testing.

use std::sync::{Arc, Mutex};

use crate::traits::{StorageError, TokenStorage};

/// Token storage that keeps the token in memory.
///
/// Clones share the same slot, so a test can keep a handle and inspect what
/// the [`crate::session::SessionStore`] wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStorage {
    token: Arc<Mutex<Option<String>>>,
    save_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `token`.
    pub fn with_token(token: &str) -> Self {
        let storage = Self::new();
        *storage.token.lock().unwrap() = Some(token.to_string());
        storage
    }

    /// Make subsequent saves fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// The token currently held.
    pub fn stored(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

impl TokenStorage for InMemoryTokenStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.stored())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(StorageError::Unavailable("Simulated save failure".to_string()));
        }
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_round_trip() {
        let storage = InMemoryTokenStorage::new();
        assert!(storage.load().unwrap().is_none());

        storage.save("abc").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("abc"));

        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_save_failure() {
        let storage = InMemoryTokenStorage::new();
        storage.set_save_should_fail(true);
        assert!(storage.save("abc").is_err());
        assert!(storage.stored().is_none());
    }
}
