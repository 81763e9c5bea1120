//! Backend request/response types.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::ModelSize;

/// Errors that can occur when communicating with the backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Generation not found: {0}")]
    GenerationNotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Engine status reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub device: String,
    #[serde(default)]
    pub dtype: Option<String>,
    pub use_small_models: bool,
    pub available_presets: Vec<String>,
}

/// Response from the presets endpoint: preset name to description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetsResponse {
    pub presets: BTreeMap<String, String>,
}

/// Response from the languages endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesResponse {
    pub languages: Vec<String>,
}

/// Response from a successful generation call.
///
/// `url` locates the produced audio on the backend; `filename` is the
/// handle accepted by the deletion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub status: String,
    pub url: String,
    pub filename: String,
    pub model_size: String,
    pub feature: String,
}

/// Mode-specific parameters for a generation request.
#[derive(Debug, Clone)]
pub enum RequestMode {
    /// Use a predefined voice preset.
    Preset { preset_name: String },
    /// Design a voice from a natural-language description.
    Design { voice_description: String },
    /// Clone a voice from reference audio, optionally with its transcript.
    Clone {
        reference_audio: PathBuf,
        reference_text: Option<String>,
    },
}

/// Request for speech generation.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub text: String,
    pub mode: RequestMode,
    pub language: String,
    pub model_size: ModelSize,
}

impl GenerateRequest {
    fn new(text: impl Into<String>, mode: RequestMode) -> Self {
        Self {
            text: text.into(),
            mode,
            language: "Auto".to_string(),
            model_size: ModelSize::default(),
        }
    }

    /// Create a preset-voice request.
    pub fn preset(text: impl Into<String>, preset_name: impl Into<String>) -> Self {
        Self::new(
            text,
            RequestMode::Preset {
                preset_name: preset_name.into(),
            },
        )
    }

    /// Create a voice-design request.
    pub fn design(text: impl Into<String>, voice_description: impl Into<String>) -> Self {
        Self::new(
            text,
            RequestMode::Design {
                voice_description: voice_description.into(),
            },
        )
    }

    /// Create a voice-clone request.
    pub fn clone_voice(text: impl Into<String>, reference_audio: PathBuf) -> Self {
        Self::new(
            text,
            RequestMode::Clone {
                reference_audio,
                reference_text: None,
            },
        )
    }

    /// Set the synthesis language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the model size.
    pub fn with_model_size(mut self, model_size: ModelSize) -> Self {
        self.model_size = model_size;
        self
    }

    /// Set the reference transcript for a clone request.
    ///
    /// No-op for other modes.
    pub fn with_reference_text(mut self, transcript: impl Into<String>) -> Self {
        if let RequestMode::Clone { reference_text, .. } = &mut self.mode {
            *reference_text = Some(transcript.into());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_builder() {
        let request = GenerateRequest::preset("Hello world", "Deep Male")
            .with_language("English")
            .with_model_size(ModelSize::Small);

        assert_eq!(request.text, "Hello world");
        assert_eq!(request.language, "English");
        assert_eq!(request.model_size, ModelSize::Small);
        assert!(matches!(
            request.mode,
            RequestMode::Preset { ref preset_name } if preset_name == "Deep Male"
        ));
    }

    #[test]
    fn test_generate_request_defaults() {
        let request = GenerateRequest::design("Hello", "A warm female voice");

        assert_eq!(request.language, "Auto");
        assert_eq!(request.model_size, ModelSize::Large);
    }

    #[test]
    fn test_clone_request_reference_text() {
        let request = GenerateRequest::clone_voice("Hello", PathBuf::from("/tmp/ref.wav"))
            .with_reference_text("the reference transcript");

        match request.mode {
            RequestMode::Clone {
                reference_audio,
                reference_text,
            } => {
                assert_eq!(reference_audio, PathBuf::from("/tmp/ref.wav"));
                assert_eq!(reference_text.as_deref(), Some("the reference transcript"));
            }
            _ => panic!("expected clone mode"),
        }
    }

    #[test]
    fn test_status_response_deserialize() {
        let json = r#"{
            "device": "cuda:0",
            "dtype": "torch.bfloat16",
            "use_small_models": false,
            "models_loaded": {"custom_voice": true, "base": false},
            "available_presets": ["Deep Male", "Energetic Female"],
            "cached_clone_prompts": []
        }"#;

        let response: StatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.device, "cuda:0");
        assert!(!response.use_small_models);
        assert_eq!(response.available_presets.len(), 2);
    }

    #[test]
    fn test_presets_response_deserialize() {
        let json = r#"{
            "presets": {
                "Deep Male": "A deep, commanding male voice",
                "Soft Whisper": "A soft, intimate whisper"
            }
        }"#;

        let response: PresetsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.presets.len(), 2);
        assert_eq!(
            response.presets.get("Deep Male").map(String::as_str),
            Some("A deep, commanding male voice")
        );
    }

    #[test]
    fn test_languages_response_deserialize() {
        let json = r#"{"languages": ["Auto", "Chinese", "English"]}"#;

        let response: LanguagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.languages, vec!["Auto", "Chinese", "English"]);
    }

    #[test]
    fn test_generation_response_deserialize() {
        let json = r#"{
            "status": "success",
            "url": "/static/generations/preset_1b2c.wav",
            "filename": "preset_1b2c.wav",
            "model_size": "1.7B",
            "feature": "preset"
        }"#;

        let response: GenerationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "success");
        assert_eq!(response.url, "/static/generations/preset_1b2c.wav");
        assert_eq!(response.filename, "preset_1b2c.wav");
        assert_eq!(response.feature, "preset");
    }
}
