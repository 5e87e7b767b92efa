use super::client::OpenAiClient;
use crate::error::{Error, Result};
use crate::session::Transcriber;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(serde::Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Speech-to-text via the OpenAI transcription API
pub struct WhisperTranscriber {
    client: Arc<OpenAiClient>,
    model: String,
}

impl WhisperTranscriber {
    pub fn new(client: Arc<OpenAiClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait::async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, wav_bytes: &[u8]) -> Result<String> {
        debug!(audio_bytes = wav_bytes.len(), "submitting audio for transcription");

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(wav_bytes.to_vec())
                    .file_name("clip.wav")
                    .mime_str("audio/wav")
                    .map_err(|e| Error::Transcription(e.to_string()))?,
            )
            .text("model", self.model.clone());

        let response = self
            .client
            .post("audio/transcriptions")
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Transcription(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transcription(format!(
                "transcription API error {status}: {body}"
            )));
        }

        let result: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| Error::Transcription(format!("malformed response: {e}")))?;

        // An empty transcript is a valid result: no speech detected.
        info!(transcript = %result.text, "transcription complete");
        Ok(result.text)
    }
}
