//! Secret configuration file storage.
//!
//! Loads the AI credential from `~/.config/tokclone/secret.json`.

use crate::paths::TokPaths;
use std::fs;
use std::path::{Path, PathBuf};
use tokclone_core::config::SecretConfig;

/// Errors that can occur during secret storage operations.
#[derive(Debug)]
pub enum SecretStorageError {
    /// Configuration file not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => {
                write!(f, "Secret file not found at: {}", path.display())
            }
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            SecretStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine config directory")
            }
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

/// Read-only storage for `secret.json`.
///
/// The file is plaintext JSON and should be readable only by its owner.
/// Its contents are never logged.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a storage for the default path (`~/.config/tokclone/secret.json`).
    pub fn new() -> Result<Self, SecretStorageError> {
        let path = TokPaths::secret_file().map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a storage for a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads and parses the secret file.
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Loads the secret file, treating a missing file as "no secrets".
    pub fn load_or_default(&self) -> Result<SecretConfig, SecretStorageError> {
        match self.load() {
            Err(SecretStorageError::NotFound(_)) => Ok(SecretConfig::default()),
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        let storage = SecretStorage::with_path(file_path.clone());

        match storage.load() {
            Err(SecretStorageError::NotFound(path)) => assert_eq!(path, file_path),
            _ => panic!("Expected NotFound error"),
        }

        let secrets = storage.load_or_default().unwrap();
        assert!(secrets.gemini_api_key().is_none());
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, r#"{"gemini": {"api_key": "test-gemini-key"}}"#).unwrap();

        let secrets = SecretStorage::with_path(file_path).load().unwrap();
        assert_eq!(secrets.gemini_api_key(), Some("test-gemini-key"));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, "{ invalid json }").unwrap();

        let result = SecretStorage::with_path(file_path).load_or_default();
        assert!(matches!(result, Err(SecretStorageError::ParseError(_))));
    }
}
