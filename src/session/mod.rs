//! Conversation session management
//!
//! This module provides the `ConversationSession` abstraction that manages:
//! - The ordered transcript (one system turn, then alternating user and
//!   assistant turns)
//! - Driving one turn at a time through completion and synthesis
//! - Incremental persistence of synthesized audio
//! - Per-turn failure isolation: no failed turn corrupts the transcript
//!   beyond retaining the user's utterance

mod artifact;
mod collaborators;
mod config;
mod session;
mod transcript;

pub use artifact::Artifact;
pub use collaborators::{AudioStream, Responder, Synthesizer, Transcriber};
pub use config::SessionConfig;
pub use session::{ConversationSession, SessionState};
pub use transcript::{Role, Transcript, Turn};
