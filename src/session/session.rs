use super::artifact::Artifact;
use super::collaborators::{AudioStream, Responder, Synthesizer};
use super::config::SessionConfig;
use super::transcript::Transcript;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use futures::StreamExt;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingInput,
    Processing,
    Terminated,
}

/// A conversation session that owns the transcript and drives one turn at
/// a time through completion and synthesis.
///
/// The session exclusively owns its transcript; collaborators hold no
/// state across calls. No two turns ever run concurrently: `run_turn`
/// takes `&mut self` and moves the session through `Processing` and back
/// to `Idle`.
pub struct ConversationSession {
    /// Session configuration
    config: SessionConfig,

    /// Ordered conversation history
    transcript: Transcript,

    /// Chat-completion collaborator
    responder: Arc<dyn Responder>,

    /// Speech-synthesis collaborator
    synthesizer: Arc<dyn Synthesizer>,

    /// Lifecycle state
    state: SessionState,

    /// Number of successfully completed turns
    turns_completed: usize,

    /// When the session was created
    started_at: DateTime<Utc>,
}

impl ConversationSession {
    /// Create a new session with its transcript seeded from the system
    /// prompt
    pub fn new(
        config: SessionConfig,
        responder: Arc<dyn Responder>,
        synthesizer: Arc<dyn Synthesizer>,
    ) -> Self {
        info!("Creating conversation session: {}", config.session_id);

        let transcript = Transcript::new(config.system_prompt.as_str());

        Self {
            config,
            transcript,
            responder,
            synthesizer,
            state: SessionState::Idle,
            turns_completed: 0,
            started_at: Utc::now(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn turns_completed(&self) -> usize {
        self.turns_completed
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Mark the session as waiting for user input. Only meaningful from
    /// `Idle`; a turn may start from either state.
    pub fn await_input(&mut self) {
        if self.state == SessionState::Idle {
            self.state = SessionState::AwaitingInput;
        }
    }

    /// Mark the session terminated. Further turns are refused.
    pub fn terminate(&mut self) {
        info!(
            "Session {} terminated after {} turn(s)",
            self.config.session_id, self.turns_completed
        );
        self.state = SessionState::Terminated;
    }

    /// Run exactly one turn: append the user utterance, obtain the
    /// assistant reply, append it, synthesize it, and persist the audio.
    ///
    /// On completion failure the user turn is retained but no assistant
    /// turn is appended. On synthesis or persistence failure both turns
    /// are retained but no artifact is produced. Either way the session
    /// returns to `Idle` and the next turn may proceed.
    pub async fn run_turn(&mut self, utterance: &str) -> Result<(String, Artifact)> {
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Err(Error::Config(
                "refusing to run a turn on an empty utterance".to_string(),
            ));
        }

        match self.state {
            SessionState::Idle | SessionState::AwaitingInput => {}
            state => {
                return Err(Error::Config(format!(
                    "session is not ready for a turn (state: {state:?})"
                )));
            }
        }

        self.state = SessionState::Processing;
        let result = self.turn_pipeline(utterance).await;
        self.state = SessionState::Idle;
        result
    }

    async fn turn_pipeline(&mut self, utterance: &str) -> Result<(String, Artifact)> {
        let turn_index = self.turns_completed;
        debug!(
            session = %self.config.session_id,
            turn = turn_index,
            "starting turn"
        );

        // (1) The user's utterance is part of history regardless of
        // whether the assistant manages to respond.
        self.transcript.push_user(utterance);

        // (2) + (3)
        let reply = self.responder.complete(&self.transcript).await?;
        self.transcript.push_assistant(reply.as_str());

        // (4)
        let stream = self
            .synthesizer
            .synthesize(&reply, &self.config.voice, &self.config.instructions)
            .await?;

        // (5)
        let output_path = self.config.resolve_output_path(turn_index);
        let artifact = persist_stream(&output_path, stream).await?;

        self.turns_completed += 1;

        info!(
            session = %self.config.session_id,
            turn = turn_index,
            bytes = artifact.bytes_written,
            path = %artifact.path.display(),
            "turn complete"
        );

        Ok((reply, artifact))
    }
}

/// Write a synthesized audio stream to disk chunk by chunk
async fn persist_stream(path: &Path, mut stream: AudioStream) -> Result<Artifact> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::Persistence(format!(
                    "failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }

    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| Error::Persistence(format!("failed to create {}: {e}", path.display())))?;

    let mut bytes_written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| Error::Persistence(format!("failed to write {}: {e}", path.display())))?;
        bytes_written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| Error::Persistence(format!("failed to flush {}: {e}", path.display())))?;

    Ok(Artifact {
        path: path.to_path_buf(),
        bytes_written,
    })
}
