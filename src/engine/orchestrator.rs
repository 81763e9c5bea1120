//! Generation orchestration.

use std::collections::BTreeMap;

use chrono::{Local, Utc};
use thiserror::Error;

use crate::backend::{BackendError, GenerateRequest, RequestMode, StatusResponse, TtsBackend};
use crate::cli::ModelSize;
use crate::library::{
    FolderRegistry, GenerationRecord, HistoryStore, LibraryError, Mode, UNFILED, default_label,
};
use crate::playback::Playback;
use crate::store::KvStore;

/// Server-side text bound, enforced locally before dispatch.
const MAX_TEXT_CHARS: usize = 5000;

/// Errors that can occur during studio operations.
#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("A generation is already in progress")]
    Busy,

    #[error("Record not found: {0}")]
    RecordNotFound(i64),

    #[error("Backend error: {0}")]
    BackendError(#[from] BackendError),

    #[error("Library error: {0}")]
    LibraryError(#[from] LibraryError),
}

/// Outcome of a record deletion.
///
/// Local removal commits first; a failed backend deletion is reported
/// here as a warning instead of rolling anything back.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome {
    /// Whether a record was removed from the local history.
    pub removed: bool,
    /// Set when the backend audio asset could not be deleted.
    pub remote_warning: Option<String>,
}

/// The studio coordinates the backend, the local library and playback.
///
/// It is the single writer path into the history: every record comes
/// from a successful generation dispatched here.
pub struct Studio<B: TtsBackend, S: KvStore> {
    backend: B,
    history: HistoryStore<S>,
    folders: FolderRegistry<S>,
    playback: Playback,
    busy: bool,
}

impl<B: TtsBackend, S: KvStore> Studio<B, S> {
    /// Create a new studio.
    pub fn new(backend: B, history: HistoryStore<S>, folders: FolderRegistry<S>) -> Self {
        Self {
            backend,
            history,
            folders,
            playback: Playback::new(),
            busy: false,
        }
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn folders(&self) -> &FolderRegistry<S> {
        &self.folders
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    // ===========================================
    // Catalog passthroughs
    // ===========================================

    /// Fetch backend engine status.
    pub fn status(&self) -> Result<StatusResponse, StudioError> {
        Ok(self.backend.status()?)
    }

    /// Fetch the preset voice catalog.
    pub fn list_presets(&self) -> Result<BTreeMap<String, String>, StudioError> {
        Ok(self.backend.list_presets()?.presets)
    }

    /// Fetch the supported language list.
    pub fn list_languages(&self) -> Result<Vec<String>, StudioError> {
        Ok(self.backend.list_languages()?.languages)
    }

    /// Download the audio bytes behind a locator.
    pub fn fetch_audio(&self, audio_ref: &str) -> Result<Vec<u8>, StudioError> {
        Ok(self.backend.fetch_audio(audio_ref)?)
    }

    // ===========================================
    // Generation
    // ===========================================

    /// Run one speech generation and record it in the history.
    ///
    /// Validates before any network call, holds the single in-flight
    /// slot for the duration of the request, and on success appends
    /// exactly one record and starts playback of the new audio.
    pub fn generate(
        &mut self,
        text: &str,
        mode: RequestMode,
        language: &str,
        model_size: ModelSize,
    ) -> Result<GenerationRecord, StudioError> {
        if self.busy {
            return Err(StudioError::Busy);
        }

        Self::validate(text, &mode)?;

        self.busy = true;
        let result = self.dispatch(text, mode, language, model_size);
        self.busy = false;

        result
    }

    fn validate(text: &str, mode: &RequestMode) -> Result<(), StudioError> {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err(StudioError::Validation("Text cannot be empty".to_string()));
        }

        if trimmed.chars().count() > MAX_TEXT_CHARS {
            return Err(StudioError::Validation(
                "Text too long (max 5000 characters)".to_string(),
            ));
        }

        match mode {
            RequestMode::Design { voice_description } if voice_description.trim().is_empty() => {
                Err(StudioError::Validation(
                    "Voice description cannot be empty".to_string(),
                ))
            }
            RequestMode::Clone {
                reference_audio, ..
            } if !reference_audio.exists() => Err(StudioError::Validation(format!(
                "Reference audio not found: {}",
                reference_audio.display()
            ))),
            _ => Ok(()),
        }
    }

    fn dispatch(
        &mut self,
        text: &str,
        mode: RequestMode,
        language: &str,
        model_size: ModelSize,
    ) -> Result<GenerationRecord, StudioError> {
        let record_mode = match &mode {
            RequestMode::Preset { preset_name } => Mode::Preset {
                preset: preset_name.clone(),
            },
            RequestMode::Design { voice_description } => Mode::Design {
                description: voice_description.clone(),
            },
            RequestMode::Clone { .. } => Mode::Clone,
        };

        let request = GenerateRequest {
            text: text.to_string(),
            mode,
            language: language.to_string(),
            model_size,
        };

        let response = self.backend.generate(&request)?;

        let record = GenerationRecord {
            id: self.next_id(),
            text: text.to_string(),
            mode: record_mode,
            created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            audio_ref: response.url,
            source_filename: Some(response.filename),
            label: default_label(text),
            folder: UNFILED.to_string(),
        };

        self.history.append(record.clone())?;

        self.playback.select(record.audio_ref.clone());
        self.playback.toggle_play_pause();

        Ok(record)
    }

    /// Next record id: the creation clock, bumped past the newest
    /// existing id so same-millisecond generations stay unique.
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        match self.history.newest_id() {
            Some(newest) if newest >= now => newest + 1,
            _ => now,
        }
    }

    // ===========================================
    // Record management
    // ===========================================

    /// Delete a record locally, then best-effort delete its backend
    /// audio asset.
    ///
    /// Deleting an absent id is a no-op. A backend failure other than
    /// "already gone" is returned as a warning; the local removal is
    /// never rolled back.
    pub fn delete_record(&mut self, id: i64) -> Result<DeleteOutcome, StudioError> {
        let Some(record) = self.history.get(id) else {
            return Ok(DeleteOutcome {
                removed: false,
                remote_warning: None,
            });
        };

        let source_filename = record.source_filename.clone();
        self.history.remove(id)?;

        let remote_warning = source_filename.and_then(|filename| {
            match self.backend.delete_generation(&filename) {
                Ok(()) => None,
                Err(BackendError::GenerationNotFound(_)) => None,
                Err(e) => Some(format!("Could not delete backend audio {filename}: {e}")),
            }
        });

        Ok(DeleteOutcome {
            removed: true,
            remote_warning,
        })
    }

    /// Rename a record. Empty or whitespace-only labels are ignored.
    pub fn rename_record(&mut self, id: i64, new_label: &str) -> Result<bool, StudioError> {
        Ok(self.history.rename(id, new_label)?)
    }

    /// Move a record into a folder (or back to unfiled).
    pub fn move_record(&mut self, id: i64, folder: &str) -> Result<bool, StudioError> {
        Ok(self.history.move_to_folder(id, folder)?)
    }

    /// Select a history record's audio and start playback.
    pub fn play_record(&mut self, id: i64) -> Result<GenerationRecord, StudioError> {
        let record = self
            .history
            .get(id)
            .cloned()
            .ok_or(StudioError::RecordNotFound(id))?;

        self.playback.select(record.audio_ref.clone());
        self.playback.toggle_play_pause();

        Ok(record)
    }

    // ===========================================
    // Folder management
    // ===========================================

    /// Create a folder. Duplicates and empty names are no-ops.
    pub fn create_folder(&mut self, name: &str) -> Result<bool, StudioError> {
        Ok(self.folders.create(name)?)
    }

    /// Delete a folder, reassigning its records to unfiled.
    ///
    /// # Returns
    /// * `Ok(Some(n))` - the folder existed; `n` records were reassigned
    /// * `Ok(None)` - no folder with that name
    pub fn delete_folder(&mut self, name: &str) -> Result<Option<usize>, StudioError> {
        if !self.folders.remove(name)? {
            return Ok(None);
        }

        let moved = self.history.reassign_folder(name, UNFILED)?;
        Ok(Some(moved))
    }
}
