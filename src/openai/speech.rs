use super::client::OpenAiClient;
use crate::error::{Error, Result};
use crate::session::{AudioStream, Synthesizer};
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
    response_format: &'a str,
}

/// Text-to-speech via the OpenAI speech API.
///
/// The response body is handed back as a stream so the session can write
/// the audio to disk incrementally.
pub struct SpeechSynthesizer {
    client: Arc<OpenAiClient>,
    model: String,
}

impl SpeechSynthesizer {
    pub fn new(client: Arc<OpenAiClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait::async_trait]
impl Synthesizer for SpeechSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        instructions: &str,
    ) -> Result<AudioStream> {
        let request = SpeechRequest {
            model: &self.model,
            input: text,
            voice,
            instructions: (!instructions.is_empty()).then_some(instructions),
            response_format: "mp3",
        };

        debug!(model = %self.model, voice = %voice, chars = text.len(), "requesting synthesis");

        let response = self
            .client
            .post("audio/speech")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Synthesis(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Synthesis(format!(
                "speech API error {status}: {body}"
            )));
        }

        Ok(response
            .bytes_stream()
            .map_err(|e| Error::Synthesis(format!("stream error: {e}")))
            .boxed())
    }
}
