//! Backend communication with the VoiceForge TTS service.
//!
//! Provides the trait and HTTP implementation for talking to the
//! FastAPI backend that wraps the pretrained TTS models.

mod client;
mod types;

pub use client::HttpBackend;
pub use types::{
    BackendError, GenerateRequest, GenerationResponse, LanguagesResponse, PresetsResponse,
    RequestMode, StatusResponse,
};

/// Trait for TTS backend communication.
///
/// This trait abstracts the HTTP communication with the VoiceForge
/// server, allowing for mock implementations in tests.
#[cfg_attr(test, mockall::automock)]
pub trait TtsBackend: Send + Sync {
    /// Fetch engine status (device, model size, preset availability).
    fn status(&self) -> Result<StatusResponse, BackendError>;

    /// Fetch the preset voice catalog (name to description).
    fn list_presets(&self) -> Result<PresetsResponse, BackendError>;

    /// Fetch the supported language list.
    fn list_languages(&self) -> Result<LanguagesResponse, BackendError>;

    /// Run one speech generation.
    ///
    /// # Arguments
    /// * `request` - Text, mode parameters, language and model size
    ///
    /// # Returns
    /// The audio locator and filename assigned by the backend
    fn generate(&self, request: &GenerateRequest) -> Result<GenerationResponse, BackendError>;

    /// Delete a generated audio asset by its backend filename.
    fn delete_generation(&self, filename: &str) -> Result<(), BackendError>;

    /// Download the audio bytes behind a locator.
    fn fetch_audio(&self, audio_ref: &str) -> Result<Vec<u8>, BackendError>;
}

/// Create an HTTP backend for the given server address.
pub fn create_backend(host: &str, port: u16) -> HttpBackend {
    HttpBackend::new(host, port)
}
