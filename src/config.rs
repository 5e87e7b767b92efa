use crate::error::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub session: SessionSettings,
    pub voice: VoiceSettings,
    pub audio: AudioSettings,
    pub openai: OpenAiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// System prompt establishing the assistant's persona
    pub system_prompt: String,

    /// Destination for synthesized audio. May contain `{turn}` and
    /// `{session}` placeholders for per-turn unique filenames; a plain
    /// filename is overwritten each turn.
    pub output_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoiceSettings {
    /// Voice identifier passed unchanged to the synthesis service
    pub name: String,

    /// Delivery instructions passed unchanged to the synthesis service
    #[serde(default)]
    pub instructions: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioSettings {
    /// How long each push-to-talk recording lasts
    #[serde(default = "default_capture_duration_secs")]
    pub capture_duration_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    #[serde(default = "default_transcribe_model")]
    pub transcribe_model: String,

    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    #[serde(default = "default_speech_model")]
    pub speech_model: String,

    /// API base URL; override to point at a compatible endpoint
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_capture_duration_secs() -> u64 {
    5
}

fn default_transcribe_model() -> String {
    "whisper-1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_speech_model() -> String {
    "gpt-4o-mini-tts".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()
            .map_err(|e| Error::Config(format!("failed to read config '{path}': {e}")))?;

        settings
            .try_deserialize()
            .map_err(|e| Error::Config(format!("invalid config '{path}': {e}")))
    }

    /// Read the API credential from the environment.
    ///
    /// The credential is treated as a single opaque string; a missing key
    /// is a fatal startup failure.
    pub fn api_key_from_env() -> Result<String> {
        match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(Error::Config(
                "OPENAI_API_KEY not found in environment".to_string(),
            )),
        }
    }
}
