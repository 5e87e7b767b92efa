pub mod audio;
pub mod config;
pub mod error;
pub mod openai;
pub mod runner;
pub mod session;

pub use audio::{pcm_to_wav, AudioCapture, CpalCapture, DisabledCapture, CAPTURE_SAMPLE_RATE};
pub use config::Config;
pub use error::{Error, Result};
pub use openai::{ChatResponder, OpenAiClient, SpeechSynthesizer, WhisperTranscriber};
pub use runner::{LoopState, ScriptedTrigger, SessionLoop, StdinTrigger, TriggerEvent, TurnTrigger};
pub use session::{
    Artifact, AudioStream, ConversationSession, Responder, Role, SessionConfig, SessionState,
    Synthesizer, Transcriber, Transcript, Turn,
};
