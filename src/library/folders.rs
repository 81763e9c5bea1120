//! User-defined folder registry.

use crate::store::{KEY_FOLDERS, KvStore};

use super::history::LibraryError;

/// Ordered set of user-defined folder names.
///
/// Folders are plain labels; records reference them by name without any
/// ownership semantics. List order defines display order. Mutations
/// write through to the store like the history collection.
pub struct FolderRegistry<S: KvStore> {
    names: Vec<String>,
    store: S,
}

impl<S: KvStore> FolderRegistry<S> {
    /// Load the folder list from the store.
    pub fn load(store: S) -> Self {
        let names = store
            .get(KEY_FOLDERS)
            .ok()
            .flatten()
            .and_then(|blob| serde_json::from_str(&blob).ok())
            .unwrap_or_default();

        Self { names, store }
    }

    fn save(&self) -> Result<(), LibraryError> {
        let blob = serde_json::to_string_pretty(&self.names)?;
        self.store.set(KEY_FOLDERS, &blob)?;
        Ok(())
    }

    /// Folder names in creation order.
    pub fn list(&self) -> &[String] {
        &self.names
    }

    /// Whether a folder with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Add a folder.
    ///
    /// The name is trimmed; empty input or an exact (case-sensitive)
    /// duplicate is a no-op. Returns `true` if the folder was added.
    pub fn create(&mut self, name: &str) -> Result<bool, LibraryError> {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return Ok(false);
        }

        self.names.push(trimmed.to_string());
        self.save()?;
        Ok(true)
    }

    /// Remove a folder by name.
    ///
    /// Returns `true` if the folder existed. Records referencing the
    /// folder are not touched here; the orchestrator reassigns them.
    pub fn remove(&mut self, name: &str) -> Result<bool, LibraryError> {
        let before = self.names.len();
        self.names.retain(|n| n != name);

        if self.names.len() == before {
            return Ok(false);
        }

        self.save()?;
        Ok(true)
    }
}
