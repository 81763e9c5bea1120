//! Generation history storage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{KEY_HISTORY, KvStore, StoreError};

/// Folder value for records that have not been assigned a folder.
pub const UNFILED: &str = "Unfiled";

/// Maximum label length derived from the submitted text.
const LABEL_PREVIEW_CHARS: usize = 48;

/// Errors that can occur when mutating the library collections.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Synthesis mode a record was generated with, including the
/// mode-specific parameters chosen at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Mode {
    /// Predefined speaker identity selected by preset name.
    Preset { preset: String },
    /// Novel speaker identity from a natural-language description.
    Design { description: String },
    /// Speaker identity derived from a reference audio sample.
    Clone,
}

impl Mode {
    /// Returns the short mode name for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Preset { .. } => "preset",
            Mode::Design { .. } => "design",
            Mode::Clone => "clone",
        }
    }
}

/// A single generation produced by the TTS backend.
///
/// The audio itself stays on the backend; `audio_ref` is an opaque
/// locator and `source_filename` is the handle used for remote deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub id: i64,
    pub text: String,
    #[serde(flatten)]
    pub mode: Mode,
    pub created_at: String,
    pub audio_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_filename: Option<String>,
    pub label: String,
    #[serde(default = "default_folder")]
    pub folder: String,
}

fn default_folder() -> String {
    UNFILED.to_string()
}

/// Derive the default record label from the submitted text.
///
/// Takes the first [`LABEL_PREVIEW_CHARS`] characters of the trimmed
/// text, appending an ellipsis when truncated.
pub fn default_label(text: &str) -> String {
    let trimmed = text.trim();
    let mut label: String = trimmed.chars().take(LABEL_PREVIEW_CHARS).collect();
    if trimmed.chars().count() > LABEL_PREVIEW_CHARS {
        label.push('…');
    }
    label
}

/// Folder selector for history views.
#[derive(Debug, Clone, PartialEq)]
pub enum FolderFilter {
    /// Every record regardless of folder.
    All,
    /// Records whose folder matches the name exactly (case-sensitive).
    Folder(String),
}

/// Ordered collection of generation records, most recent first.
///
/// Every mutation writes the full collection through to the store before
/// returning. Loading tolerates a missing or unparsable blob by starting
/// empty.
pub struct HistoryStore<S: KvStore> {
    records: Vec<GenerationRecord>,
    store: S,
}

impl<S: KvStore> HistoryStore<S> {
    /// Load the history from the store.
    pub fn load(store: S) -> Self {
        let records = store
            .get(KEY_HISTORY)
            .ok()
            .flatten()
            .and_then(|blob| serde_json::from_str(&blob).ok())
            .unwrap_or_default();

        Self { records, store }
    }

    fn save(&self) -> Result<(), LibraryError> {
        let blob = serde_json::to_string_pretty(&self.records)?;
        self.store.set(KEY_HISTORY, &blob)?;
        Ok(())
    }

    /// All records, most recent first.
    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    /// Look up a record by id.
    pub fn get(&self, id: i64) -> Option<&GenerationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Highest id currently in the collection.
    pub fn newest_id(&self) -> Option<i64> {
        self.records.iter().map(|r| r.id).max()
    }

    /// Insert a record at the front of the history.
    ///
    /// Ids must be unique; the caller is responsible for supplying one
    /// that is not already present.
    pub fn append(&mut self, record: GenerationRecord) -> Result<(), LibraryError> {
        self.records.insert(0, record);
        self.save()
    }

    /// Remove the record with the given id.
    ///
    /// Returns `true` if a record was removed. Removing an absent id is
    /// a no-op, not an error.
    pub fn remove(&mut self, id: i64) -> Result<bool, LibraryError> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);

        if self.records.len() == before {
            return Ok(false);
        }

        self.save()?;
        Ok(true)
    }

    /// Set the label of a record.
    ///
    /// The new label is trimmed; empty or whitespace-only input leaves
    /// the record unchanged. Returns `true` if the label was updated.
    pub fn rename(&mut self, id: i64, new_label: &str) -> Result<bool, LibraryError> {
        let trimmed = new_label.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };

        record.label = trimmed.to_string();
        self.save()?;
        Ok(true)
    }

    /// Assign a record to a folder.
    ///
    /// The folder name is set unconditionally; no existence check is made
    /// against the folder registry. Returns `true` if the record exists.
    pub fn move_to_folder(&mut self, id: i64, folder: &str) -> Result<bool, LibraryError> {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };

        record.folder = folder.to_string();
        self.save()?;
        Ok(true)
    }

    /// Move every record in `from` to the folder `to`.
    ///
    /// Returns the number of records reassigned.
    pub fn reassign_folder(&mut self, from: &str, to: &str) -> Result<usize, LibraryError> {
        let mut moved = 0;
        for record in self.records.iter_mut().filter(|r| r.folder == from) {
            record.folder = to.to_string();
            moved += 1;
        }

        if moved > 0 {
            self.save()?;
        }

        Ok(moved)
    }

    /// Iterate records matching the folder selector, preserving order.
    ///
    /// The returned iterator borrows the store and can be restarted by
    /// calling `filter` again.
    pub fn filter<'a>(
        &'a self,
        selector: &'a FolderFilter,
    ) -> impl Iterator<Item = &'a GenerationRecord> {
        self.records.iter().filter(move |r| match selector {
            FolderFilter::All => true,
            FolderFilter::Folder(name) => r.folder == *name,
        })
    }
}
