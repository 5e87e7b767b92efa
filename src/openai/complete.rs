use super::client::OpenAiClient;
use crate::error::{Error, Result};
use crate::session::{Responder, Transcript};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Next-utterance generation via the OpenAI chat completions API
pub struct ChatResponder {
    client: Arc<OpenAiClient>,
    model: String,
}

impl ChatResponder {
    pub fn new(client: Arc<OpenAiClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait::async_trait]
impl Responder for ChatResponder {
    async fn complete(&self, transcript: &Transcript) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: transcript
                .turns()
                .iter()
                .map(|turn| WireMessage {
                    role: turn.role.as_str(),
                    content: &turn.content,
                })
                .collect(),
        };

        debug!(
            model = %self.model,
            turns = transcript.len(),
            "requesting completion"
        );

        let response = self
            .client
            .post("chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Completion(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Completion(format!(
                "completion API error {status}: {body}"
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Completion(format!("malformed response: {e}")))?;

        let reply = result
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .unwrap_or_default()
            .trim()
            .to_string();

        if reply.is_empty() {
            return Err(Error::Completion(
                "service returned an empty completion".to_string(),
            ));
        }

        Ok(reply)
    }
}
