//! CLI argument definitions and parsing.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable forcing the backend onto the CPU.
pub const ENV_DEVICE: &str = "VOICEFORGE_DEVICE";
/// Environment variable selecting the reduced model size.
pub const ENV_SMALL_MODELS: &str = "VOICEFORGE_SMALL_MODELS";

/// VoiceForge text-to-speech client.
#[derive(Parser, Debug)]
#[command(name = "voiceforge-rs")]
#[command(about = "Preset, designed and cloned voice synthesis via a VoiceForge backend")]
#[command(version)]
pub struct Args {
    /// Text to synthesize
    #[arg(short, long)]
    pub text: Option<String>,

    /// Generate with a preset voice by name
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Generate with a voice designed from this description
    #[arg(short, long)]
    pub design: Option<String>,

    /// Generate with a voice cloned from this reference audio file
    #[arg(short, long)]
    pub clone: Option<PathBuf>,

    /// Transcript of the reference audio (clone mode, improves quality)
    #[arg(long)]
    pub transcript: Option<String>,

    /// Synthesis language, or "Auto" to detect
    #[arg(short, long, default_value = "Auto")]
    pub language: String,

    /// Output audio file for generated speech
    #[arg(short, long, default_value = "output.wav")]
    pub output: PathBuf,

    /// List the generation history
    #[arg(long)]
    pub history: bool,

    /// Folder to filter the history by, or to move a record into
    #[arg(long)]
    pub folder: Option<String>,

    /// List folders
    #[arg(long)]
    pub folders: bool,

    /// Create a folder
    #[arg(long, value_name = "NAME")]
    pub new_folder: Option<String>,

    /// Delete a folder (its records become unfiled)
    #[arg(long, value_name = "NAME")]
    pub delete_folder: Option<String>,

    /// Delete a history record by id
    #[arg(long, value_name = "ID")]
    pub delete: Option<i64>,

    /// Rename a history record by id (requires --label)
    #[arg(long, value_name = "ID")]
    pub rename: Option<i64>,

    /// New label for --rename
    #[arg(long)]
    pub label: Option<String>,

    /// Move a history record into the folder given by --folder
    #[arg(long = "move", value_name = "ID")]
    pub move_record: Option<i64>,

    /// Replay a history record by id
    #[arg(long, value_name = "ID")]
    pub play: Option<i64>,

    /// Show backend engine status
    #[arg(long)]
    pub status: bool,

    /// List available voice presets
    #[arg(long)]
    pub list_presets: bool,

    /// List supported languages
    #[arg(long)]
    pub list_languages: bool,

    /// Backend host address
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Backend port
    #[arg(long, default_value = "8000")]
    pub port: u16,

    /// Force CPU inference on the backend launcher
    #[arg(long)]
    pub cpu: bool,

    /// Use the smaller, faster model
    #[arg(long)]
    pub small: bool,
}

/// TTS model size selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModelSize {
    /// Qwen3-TTS 1.7B (default quality)
    #[default]
    Large,

    /// Qwen3-TTS 0.6B (faster, less memory)
    Small,
}

impl ModelSize {
    /// Returns the wire value for this model size.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSize::Large => "1.7B",
            ModelSize::Small => "0.6B",
        }
    }
}

/// Generation mode selected by the flags.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeSelection {
    Preset(String),
    Design(String),
    Clone {
        reference_audio: PathBuf,
        transcript: Option<String>,
    },
}

/// Errors that can occur when resolving the generation flags.
#[derive(Error, Debug)]
pub enum ModeSelectionError {
    #[error("Only one of --preset, --design, --clone may be given")]
    MultipleModes,

    #[error("--text requires one of --preset, --design, or --clone")]
    MissingMode,

    #[error("--preset, --design and --clone require --text")]
    MissingText,
}

impl Args {
    /// Model size implied by the `--small` flag.
    pub fn model_size(&self) -> ModelSize {
        if self.small {
            ModelSize::Small
        } else {
            ModelSize::Large
        }
    }

    /// Resolve the generation flags into a mode, if any were given.
    ///
    /// # Returns
    /// * `Ok(None)` when no generation was requested
    /// * `Ok(Some(mode))` for a consistent text + mode combination
    /// * `Err(ModeSelectionError)` for conflicting or incomplete flags
    pub fn mode_selection(&self) -> Result<Option<ModeSelection>, ModeSelectionError> {
        let mode = match (&self.preset, &self.design, &self.clone) {
            (None, None, None) => {
                if self.text.is_some() {
                    return Err(ModeSelectionError::MissingMode);
                }
                return Ok(None);
            }
            (Some(preset), None, None) => ModeSelection::Preset(preset.clone()),
            (None, Some(description), None) => ModeSelection::Design(description.clone()),
            (None, None, Some(reference)) => ModeSelection::Clone {
                reference_audio: reference.clone(),
                transcript: self.transcript.clone(),
            },
            _ => return Err(ModeSelectionError::MultipleModes),
        };

        if self.text.is_none() {
            return Err(ModeSelectionError::MissingText);
        }

        Ok(Some(mode))
    }
}
