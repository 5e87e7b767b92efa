use std::path::PathBuf;

/// Configuration for a conversation session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "session-2026-08-23-demo")
    pub session_id: String,

    /// The sole system turn, set once at session creation
    pub system_prompt: String,

    /// Voice identifier forwarded unchanged to the synthesis service
    pub voice: String,

    /// Delivery instructions forwarded unchanged to the synthesis service
    pub instructions: String,

    /// Destination path template for synthesized audio. `{turn}` expands
    /// to the zero-based turn index, `{session}` to the session id. A
    /// template without placeholders is overwritten every turn.
    pub output_path: String,
}

impl SessionConfig {
    /// Resolve the output path for a given turn index
    pub fn resolve_output_path(&self, turn_index: usize) -> PathBuf {
        PathBuf::from(
            self.output_path
                .replace("{turn}", &format!("{turn_index:03}"))
                .replace("{session}", &self.session_id),
        )
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            system_prompt: "You are a helpful voice assistant. Keep your replies short and conversational.".to_string(),
            voice: "coral".to_string(),
            instructions: "Speak in a warm, natural tone.".to_string(),
            output_path: "speech.mp3".to_string(),
        }
    }
}
