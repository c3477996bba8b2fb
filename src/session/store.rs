//! Process-wide session store.

use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::claims::{decode_claims, Claims, MalformedTokenError};
use crate::traits::TokenStorage;

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `set_session` was called with an empty token.
    EmptyToken,
    /// No token is stored.
    NotAuthenticated,
    /// The stored token does not decode.
    Malformed(MalformedTokenError),
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            SessionError::EmptyToken => "The server returned an empty session token.".to_string(),
            SessionError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
            SessionError::Malformed(_) => {
                "The server returned a session token this client cannot read.".to_string()
            }
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyToken => write!(f, "Refusing to store an empty token"),
            SessionError::NotAuthenticated => write!(f, "No session token"),
            SessionError::Malformed(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Malformed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MalformedTokenError> for SessionError {
    fn from(e: MalformedTokenError) -> Self {
        SessionError::Malformed(e)
    }
}

/// Holds the current authentication token.
///
/// One instance is created at startup and shared (`Arc<SessionStore>`) with
/// the API client and the auth flow. The auth flow and logout are the only
/// writers.
pub struct SessionStore {
    token: RwLock<Option<String>>,
    storage: Option<Box<dyn TokenStorage>>,
}

impl SessionStore {
    /// A store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            token: RwLock::new(None),
            storage: None,
        }
    }

    /// A store backed by `storage`, seeded with whatever token it holds.
    ///
    /// A persisted token that no longer decodes is discarded so the store
    /// never holds a malformed credential.
    pub fn with_storage(storage: Box<dyn TokenStorage>) -> Self {
        let initial = match storage.load() {
            Ok(Some(token)) => match decode_claims(&token) {
                Ok(_) => Some(token),
                Err(e) => {
                    tracing::warn!("Discarding persisted session token: {}", e);
                    if let Err(e) = storage.clear() {
                        tracing::warn!("Failed to clear persisted session: {}", e);
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to load persisted session: {}", e);
                None
            }
        };

        if initial.is_some() {
            tracing::debug!("Restored persisted session");
        }

        Self {
            token: RwLock::new(initial),
            storage: Some(storage),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<String>> {
        self.token.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<String>> {
        self.token.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Store `token` for the rest of the session.
    ///
    /// A persistence failure is logged; the in-memory session still holds
    /// the token.
    pub fn set_session(&self, token: &str) -> Result<(), SessionError> {
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }

        *self.write() = Some(token.to_string());

        if let Some(storage) = &self.storage {
            if let Err(e) = storage.save(token) {
                tracing::warn!("Failed to persist session token: {}", e);
            }
        }
        tracing::info!("Session started");
        Ok(())
    }

    /// The current token, if any.
    pub fn token(&self) -> Option<String> {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Decode the current token's claims.
    pub fn claims(&self) -> Result<Claims, SessionError> {
        let guard = self.read();
        let token = guard.as_deref().ok_or(SessionError::NotAuthenticated)?;
        Ok(decode_claims(token)?)
    }

    /// Drop the current token from memory and storage.
    pub fn clear_session(&self) {
        *self.write() = None;

        if let Some(storage) = &self.storage {
            if let Err(e) = storage.clear() {
                tracing::warn!("Failed to clear persisted session: {}", e);
            }
        }
        tracing::info!("Session cleared");
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never print the token itself
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("persistent", &self.storage.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemoryTokenStorage;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    fn token(role: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(
            r#"{{"role":"{}","sub":"alice","exp":4102444800}}"#,
            role
        ));
        format!("{}.{}.sig", header, payload)
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = SessionStore::in_memory();
        assert!(store.token().is_none());
        assert!(!store.is_authenticated());
        assert_eq!(store.claims(), Err(SessionError::NotAuthenticated));
    }

    #[test]
    fn test_set_and_get_token() {
        let store = SessionStore::in_memory();
        let t = token("MEMBER");
        store.set_session(&t).unwrap();
        assert_eq!(store.token(), Some(t));
        assert_eq!(store.claims().unwrap().subject, "alice");
    }

    #[test]
    fn test_empty_token_rejected() {
        let store = SessionStore::in_memory();
        assert_eq!(store.set_session(""), Err(SessionError::EmptyToken));
        assert_eq!(store.set_session("   "), Err(SessionError::EmptyToken));
        assert!(store.token().is_none());
    }

    #[test]
    fn test_set_session_does_not_validate_shape() {
        let store = SessionStore::in_memory();
        store.set_session("opaque").unwrap();
        assert_eq!(store.token().as_deref(), Some("opaque"));
        assert!(matches!(store.claims(), Err(SessionError::Malformed(_))));
    }

    #[test]
    fn test_clear_session() {
        let store = SessionStore::in_memory();
        store.set_session(&token("ADMIN")).unwrap();
        store.clear_session();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_storage_is_written_and_cleared() {
        let storage = InMemoryTokenStorage::new();
        let store = SessionStore::with_storage(Box::new(storage.clone()));
        let t = token("MEMBER");

        store.set_session(&t).unwrap();
        assert_eq!(storage.stored(), Some(t));

        store.clear_session();
        assert!(storage.stored().is_none());
    }

    #[test]
    fn test_store_restores_persisted_token() {
        let t = token("MEMBER");
        let storage = InMemoryTokenStorage::with_token(&t);
        let store = SessionStore::with_storage(Box::new(storage));
        assert_eq!(store.token(), Some(t));
    }

    #[test]
    fn test_malformed_persisted_token_is_discarded() {
        let storage = InMemoryTokenStorage::with_token("garbage");
        let store = SessionStore::with_storage(Box::new(storage.clone()));
        assert!(store.token().is_none());
        assert!(storage.stored().is_none());
    }

    #[test]
    fn test_save_failure_keeps_in_memory_token() {
        let storage = InMemoryTokenStorage::new();
        storage.set_save_should_fail(true);
        let store = SessionStore::with_storage(Box::new(storage.clone()));
        let t = token("MEMBER");

        assert!(store.set_session(&t).is_ok());
        assert_eq!(store.token(), Some(t));
        assert!(storage.stored().is_none());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let store = SessionStore::in_memory();
        let t = token("MEMBER");
        store.set_session(&t).unwrap();
        let debug = format!("{:?}", store);
        assert!(!debug.contains(&t));
        assert!(debug.contains("authenticated: true"));
    }
}
