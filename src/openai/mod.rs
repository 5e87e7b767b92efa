//! OpenAI-backed collaborators: transcription, chat completion, and
//! speech synthesis, all sharing one credential-bound HTTP client.

mod client;
mod complete;
mod speech;
mod transcribe;

pub use client::OpenAiClient;
pub use complete::ChatResponder;
pub use speech::SpeechSynthesizer;
pub use transcribe::WhisperTranscriber;
