//! File-based session token storage.
//!
//! The token is stored in `~/.libris/session.json` unless another path is
//! configured.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::traits::{StorageError, TokenStorage};

/// The session directory name under the home directory.
const SESSION_DIR: &str = ".libris";

/// The session file name.
const SESSION_FILE: &str = "session.json";

/// On-disk shape of the session file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    token: Option<String>,
}

/// Default location of the session file.
pub fn default_session_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(SESSION_DIR).join(SESSION_FILE))
}

/// Stores the session token in a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Storage at the default location.
    pub fn new() -> Result<Self, StorageError> {
        default_session_path()
            .map(Self::at)
            .ok_or_else(|| StorageError::Unavailable("Failed to determine home directory".to_string()))
    }

    /// Storage at a specific path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let stored: StoredSession = serde_json::from_reader(reader)?;
        Ok(stored.token.filter(|t| !t.is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path)?;

        // The file holds a bearer credential; keep it private to the user.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = file.metadata()?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        let mut writer = BufWriter::new(file);
        let stored = StoredSession {
            token: Some(token.to_string()),
        };
        serde_json::to_writer_pretty(&mut writer, &stored)?;
        writer.flush()?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path)?;
        Ok(())
    }
}
