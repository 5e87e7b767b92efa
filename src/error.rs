use thiserror::Error;

/// Result type alias for voice-loop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a conversation session.
///
/// `Config` is fatal: the session never starts. Every other variant is
/// recoverable at the turn level; the loop reports it and returns to
/// listening.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing credential or invalid configuration, detected at startup
    #[error("configuration error: {0}")]
    Config(String),

    /// Audio device capture failure
    #[error("audio capture error: {0}")]
    Capture(String),

    /// Speech-to-text failure
    #[error("transcription error: {0}")]
    Transcription(String),

    /// Chat completion failure (service error or empty completion)
    #[error("completion error: {0}")]
    Completion(String),

    /// Text-to-speech failure
    #[error("speech synthesis error: {0}")]
    Synthesis(String),

    /// Failure writing the synthesized artifact to disk
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl Error {
    /// Whether this error should terminate the session.
    ///
    /// Only configuration errors are fatal; per-turn failures leave the
    /// loop free to retry on the next turn.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Name of the pipeline step that failed, for user-facing reporting
    pub fn step(&self) -> &'static str {
        match self {
            Error::Config(_) => "configuration",
            Error::Capture(_) => "capture",
            Error::Transcription(_) => "transcription",
            Error::Completion(_) => "completion",
            Error::Synthesis(_) => "synthesis",
            Error::Persistence(_) => "persistence",
        }
    }
}
