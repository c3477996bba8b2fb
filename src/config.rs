//! Client configuration.

use std::path::PathBuf;

use crate::adapters::file_session::{default_session_path, FileTokenStorage};
use crate::api::DEFAULT_API_URL;
use crate::session::SessionStore;

/// Environment variable overriding the service URL.
pub const ENV_API_URL: &str = "LIBRIS_API_URL";
/// Environment variable overriding the session file location.
pub const ENV_SESSION_FILE: &str = "LIBRIS_SESSION_FILE";
/// When set, the session is kept in memory only.
pub const ENV_NO_PERSIST: &str = "LIBRIS_NO_PERSIST";

/// Configuration for the client.
///
/// Use the builder methods to customize.
///
/// # Example
///
/// ```
/// use libris::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("http://library.internal:8080")
///     .with_persist_session(false);
/// assert_eq!(config.base_url, "http://library.internal:8080");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the library service (default: http://localhost:8080)
    pub base_url: String,
    /// Session file override (default: ~/.libris/session.json)
    pub session_file: Option<PathBuf>,
    /// Keep the session token across runs (default: true)
    pub persist_session: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            session_file: None,
            persist_session: true,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    pub fn with_persist_session(mut self, persist: bool) -> Self {
        self.persist_session = persist;
        self
    }

    /// Defaults overridden by `LIBRIS_API_URL`, `LIBRIS_SESSION_FILE` and
    /// `LIBRIS_NO_PERSIST`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }
        if let Ok(path) = std::env::var(ENV_SESSION_FILE) {
            if !path.trim().is_empty() {
                config = config.with_session_file(path.trim());
            }
        }
        if std::env::var(ENV_NO_PERSIST).is_ok() {
            config = config.with_persist_session(false);
        }
        config
    }

    /// The session file this configuration resolves to, if persistence is on.
    pub fn session_path(&self) -> Option<PathBuf> {
        if !self.persist_session {
            return None;
        }
        self.session_file.clone().or_else(default_session_path)
    }

    /// Build the session store this configuration describes.
    ///
    /// Falls back to an in-memory store when no session file location can
    /// be determined.
    pub fn session_store(&self) -> SessionStore {
        match self.session_path() {
            Some(path) => SessionStore::with_storage(Box::new(FileTokenStorage::at(path))),
            None => {
                if self.persist_session {
                    tracing::warn!("No home directory; session will not persist");
                }
                SessionStore::in_memory()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(ENV_API_URL);
        std::env::remove_var(ENV_SESSION_FILE);
        std::env::remove_var(ENV_NO_PERSIST);
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.session_file.is_none());
        assert!(config.persist_session);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new()
            .with_base_url("http://x")
            .with_session_file("/tmp/s.json")
            .with_persist_session(true);
        assert_eq!(config.base_url, "http://x");
        assert_eq!(config.session_path(), Some(PathBuf::from("/tmp/s.json")));
    }

    #[test]
    fn test_no_session_path_when_not_persisting() {
        let config = ClientConfig::new()
            .with_session_file("/tmp/s.json")
            .with_persist_session(false);
        assert!(config.session_path().is_none());
        assert!(!config.session_store().is_authenticated());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var(ENV_API_URL, " http://library.test:9000 ");
        std::env::set_var(ENV_SESSION_FILE, "/tmp/libris-test/session.json");
        std::env::set_var(ENV_NO_PERSIST, "1");

        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, "http://library.test:9000");
        assert_eq!(
            config.session_file,
            Some(PathBuf::from("/tmp/libris-test/session.json"))
        );
        assert!(!config.persist_session);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_blank_values() {
        clear_env();
        std::env::set_var(ENV_API_URL, "   ");
        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        clear_env();
    }
}
