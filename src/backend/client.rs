//! HTTP client for backend communication.

use std::path::Path;

use super::TtsBackend;
use super::types::{
    BackendError, GenerateRequest, GenerationResponse, LanguagesResponse, PresetsResponse,
    RequestMode, StatusResponse,
};

/// HTTP-based backend client.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    /// Create a new HTTP backend client.
    pub fn new(host: &str, port: u16) -> Self {
        let base_url = format!("http://{host}:{port}");

        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Get the base URL for this backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    /// Map a non-success response to an error, preferring the structured
    /// `detail` message when the body carries one.
    fn error_from_response(response: reqwest::blocking::Response) -> BackendError {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            detail: String,
        }

        let status = response.status();
        let body = response.text().unwrap_or_default();

        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err) => BackendError::Backend(err.detail),
            Err(_) => BackendError::RequestFailed(format!("Status: {status}")),
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, BackendError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response));
        }

        response
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    /// Build the multipart form for a clone request.
    fn clone_form(
        &self,
        request: &GenerateRequest,
        reference_audio: &Path,
        reference_text: Option<&str>,
    ) -> Result<reqwest::blocking::multipart::Form, BackendError> {
        let audio_data = std::fs::read(reference_audio)
            .map_err(|_| BackendError::FileNotFound(reference_audio.display().to_string()))?;

        let file_name = reference_audio
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("reference.wav");

        let file_part = reqwest::blocking::multipart::Part::bytes(audio_data)
            .file_name(file_name.to_string())
            .mime_str("audio/wav")
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        let mut form = reqwest::blocking::multipart::Form::new()
            .part("file", file_part)
            .text("text", request.text.clone())
            .text("language", request.language.clone())
            .text("model_size", request.model_size.as_str().to_string());

        if let Some(transcript) = reference_text {
            form = form.text("reference_text", transcript.to_string());
        }

        Ok(form)
    }
}

impl TtsBackend for HttpBackend {
    fn status(&self) -> Result<StatusResponse, BackendError> {
        self.get_json(&self.api_url("/status"))
    }

    fn list_presets(&self) -> Result<PresetsResponse, BackendError> {
        self.get_json(&self.api_url("/presets"))
    }

    fn list_languages(&self) -> Result<LanguagesResponse, BackendError> {
        self.get_json(&self.api_url("/languages"))
    }

    fn generate(&self, request: &GenerateRequest) -> Result<GenerationResponse, BackendError> {
        let builder = match &request.mode {
            RequestMode::Preset { preset_name } => self
                .client
                .post(self.api_url("/tts/preset"))
                .form(&[
                    ("text", request.text.as_str()),
                    ("preset_name", preset_name.as_str()),
                    ("language", request.language.as_str()),
                    ("model_size", request.model_size.as_str()),
                ]),
            RequestMode::Design { voice_description } => self
                .client
                .post(self.api_url("/tts/design"))
                .form(&[
                    ("text", request.text.as_str()),
                    ("voice_description", voice_description.as_str()),
                    ("language", request.language.as_str()),
                ]),
            RequestMode::Clone {
                reference_audio,
                reference_text,
            } => {
                let form =
                    self.clone_form(request, reference_audio, reference_text.as_deref())?;
                self.client.post(self.api_url("/tts/clone")).multipart(form)
            }
        };

        let response = builder
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response));
        }

        response
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    fn delete_generation(&self, filename: &str) -> Result<(), BackendError> {
        let url = self.api_url(&format!("/generations/{filename}"));

        let response = self
            .client
            .delete(&url)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if response.status().as_u16() == 404 {
            return Err(BackendError::GenerationNotFound(filename.to_string()));
        }

        if !response.status().is_success() {
            return Err(Self::error_from_response(response));
        }

        Ok(())
    }

    fn fetch_audio(&self, audio_ref: &str) -> Result<Vec<u8>, BackendError> {
        // Locators from generation responses are server-relative paths.
        let url = if audio_ref.starts_with("http") {
            audio_ref.to_string()
        } else {
            format!("{}{audio_ref}", self.base_url)
        };

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::RequestFailed(format!(
                "Download failed: {}",
                response.status()
            )));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}
