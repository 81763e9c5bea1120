//! Durable key-value storage for the local library.
//!
//! The history and folder collections are persisted as opaque JSON blobs
//! keyed by collection name, one write per mutation.

mod file;

pub use file::{FileStore, StoreError};

/// Storage key for the generation history collection.
pub const KEY_HISTORY: &str = "history";
/// Storage key for the folder list.
pub const KEY_FOLDERS: &str = "folders";

/// Trait for durable key-value blob storage.
pub trait KvStore {
    /// Read the blob for a key, if present.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write the blob for a key, replacing any previous value.
    fn set(&self, key: &str, blob: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_default_directory() {
        let store = FileStore::new();
        let expected = dirs::home_dir()
            .unwrap()
            .join(".voiceforge-rs")
            .join("library");
        assert_eq!(store.library_dir(), expected);
    }

    #[test]
    fn test_file_store_custom_directory() {
        let custom_path = PathBuf::from("/tmp/custom-library");
        let store = FileStore::with_dir(custom_path.clone());
        assert_eq!(store.library_dir(), custom_path);
    }

    #[test]
    fn test_file_store_get_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::with_dir(temp_dir.path().to_path_buf());

        let blob = store.get(KEY_HISTORY).unwrap();
        assert!(blob.is_none());
    }

    #[test]
    fn test_file_store_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::with_dir(temp_dir.path().to_path_buf());

        store.set(KEY_HISTORY, r#"[{"id":1}]"#).unwrap();

        let blob = store.get(KEY_HISTORY).unwrap();
        assert_eq!(blob.as_deref(), Some(r#"[{"id":1}]"#));
    }

    #[test]
    fn test_file_store_set_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::with_dir(temp_dir.path().to_path_buf());

        store.set(KEY_FOLDERS, r#"["a"]"#).unwrap();
        store.set(KEY_FOLDERS, r#"["a","b"]"#).unwrap();

        let blob = store.get(KEY_FOLDERS).unwrap();
        assert_eq!(blob.as_deref(), Some(r#"["a","b"]"#));
    }

    #[test]
    fn test_file_store_keys_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::with_dir(temp_dir.path().to_path_buf());

        store.set(KEY_HISTORY, "[]").unwrap();
        store.set(KEY_FOLDERS, r#"["Favorites"]"#).unwrap();

        assert_eq!(store.get(KEY_HISTORY).unwrap().as_deref(), Some("[]"));
        assert_eq!(
            store.get(KEY_FOLDERS).unwrap().as_deref(),
            Some(r#"["Favorites"]"#)
        );
    }

    #[test]
    fn test_file_store_creates_directory_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("deep").join("library");
        let store = FileStore::with_dir(nested.clone());

        store.set(KEY_HISTORY, "[]").unwrap();
        assert!(nested.join("history.json").exists());
    }

    #[test]
    fn test_file_store_validates_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::with_dir(temp_dir.path().to_path_buf());

        let result = store.set("../evil", "{}");
        assert!(matches!(result.unwrap_err(), StoreError::InvalidKey(_)));

        let result = store.get("a/b");
        assert!(matches!(result.unwrap_err(), StoreError::InvalidKey(_)));
    }
}
