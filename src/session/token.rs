//! Token Store
//!
//! Where the bearer token lives between login and chat. Login writes it,
//! chat reads it before every send; nothing ever deletes it.

use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Key the token is stored under
pub const TOKEN_KEY: &str = "token";

/// Persisted key-value home of the session token
pub trait TokenStore: Send + Sync {
    /// Current token, if one has been stored
    fn get_token(&self) -> Result<Option<String>, TokenStoreError>;

    /// Replace the stored token
    fn set_token(&self, token: &str) -> Result<(), TokenStoreError>;
}

/// Process-local store, used by tests and one-shot runs
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_token(&self) -> Result<Option<String>, TokenStoreError> {
        let guard = self.token.read().map_err(|_| TokenStoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn set_token(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut guard = self.token.write().map_err(|_| TokenStoreError::Poisoned)?;
        *guard = Some(token.to_string());
        Ok(())
    }
}

/// TOML session file holding a `token = "..."` entry.
///
/// Other keys in the file are preserved on write.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<toml::Table, TokenStoreError> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| TokenStoreError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        })?;

        content.parse::<toml::Table>().map_err(|e| TokenStoreError::Parse {
            path: self.path.clone(),
            error: e.to_string(),
        })
    }
}

impl TokenStore for FileTokenStore {
    fn get_token(&self) -> Result<Option<String>, TokenStoreError> {
        let table = self.read_table()?;
        Ok(table
            .get(TOKEN_KEY)
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }

    fn set_token(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut table = self.read_table()?;
        table.insert(TOKEN_KEY.to_string(), toml::Value::String(token.to_string()));

        let content = toml::to_string(&table)
            .map_err(|e| TokenStoreError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| TokenStoreError::Io {
                    path: parent.to_path_buf(),
                    error: e.to_string(),
                })?;
            }
        }

        std::fs::write(&self.path, content)
            .and_then(|()| set_owner_only_permissions(&self.path))
            .map_err(|e| TokenStoreError::Io {
                path: self.path.clone(),
                error: e.to_string(),
            })?;

        tracing::debug!("Session token written to {:?}", self.path);
        Ok(())
    }
}

/// The session file holds a bearer token; keep it owner read/write only.
#[cfg(unix)]
fn set_owner_only_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn set_owner_only_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Token store errors
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Failed to access session file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse session file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Failed to encode session file: {0}")]
    Serialize(String),

    #[error("Token store lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_round() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get_token().unwrap(), None);

        store.set_token("abc").unwrap();
        assert_eq!(store.get_token().unwrap().as_deref(), Some("abc"));

        store.set_token("def").unwrap();
        assert_eq!(store.get_token().unwrap().as_deref(), Some("def"));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.toml"));
        assert_eq!(store.get_token().unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.toml");

        FileTokenStore::new(&path).set_token("token_user123").unwrap();

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get_token().unwrap().as_deref(), Some("token_user123"));
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "theme = \"warm\"\ntoken = \"old\"\n").unwrap();

        let store = FileTokenStore::new(&path);
        store.set_token("new").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("theme = \"warm\""));
        assert_eq!(store.get_token().unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let err = FileTokenStore::new(&path).get_token().unwrap_err();
        assert!(matches!(err, TokenStoreError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "theme = \"warm\"\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        FileTokenStore::new(&path).set_token("abc").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
