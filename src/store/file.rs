//! File-backed key-value store.

use std::path::PathBuf;

use thiserror::Error;

use super::KvStore;

/// Errors that can occur when reading or writing the store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Stores each key as a JSON file under a library directory.
pub struct FileStore {
    library_dir: PathBuf,
}

impl FileStore {
    /// Create a new FileStore rooted at the default directory.
    pub fn new() -> Self {
        let library_dir = dirs::home_dir()
            .expect("Could not find home directory")
            .join(".voiceforge-rs")
            .join("library");

        Self { library_dir }
    }

    /// Create a new FileStore rooted at a custom directory.
    pub fn with_dir(library_dir: PathBuf) -> Self {
        Self { library_dir }
    }

    /// Get the library directory path.
    pub fn library_dir(&self) -> PathBuf {
        self.library_dir.clone()
    }

    /// Validate a store key.
    fn validate_key(key: &str) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey("Key cannot be empty".to_string()));
        }

        // Prevent path traversal
        if key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(StoreError::InvalidKey(
                "Key cannot contain path separators".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the file path for a key.
    fn blob_path(&self, key: &str) -> PathBuf {
        self.library_dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::validate_key(key)?;

        let path = self.blob_path(key);

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        Self::validate_key(key)?;

        // Ensure directory exists
        std::fs::create_dir_all(&self.library_dir)?;

        std::fs::write(self.blob_path(key), blob)?;

        Ok(())
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}
