use std::collections::VecDeque;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

/// User intent observed by the session loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Record a clip and transcribe it
    StartTurn,

    /// Run a turn on already-available text, skipping capture and
    /// transcription
    Utterance(String),

    /// Terminate the session
    Quit,
}

/// Source of user intent for the session loop.
///
/// Waiting for the next event is a blocking wait on the user, not on
/// network I/O; there is no timeout.
#[async_trait::async_trait]
pub trait TurnTrigger: Send {
    async fn next_event(&mut self) -> TriggerEvent;
}

/// Line-based trigger on standard input: an empty line starts a recorded
/// turn, `q`/`quit` terminates, anything else is a direct text utterance.
pub struct StdinTrigger {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinTrigger {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinTrigger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TurnTrigger for StdinTrigger {
    async fn next_event(&mut self) -> TriggerEvent {
        match self.lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    TriggerEvent::StartTurn
                } else if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                    TriggerEvent::Quit
                } else {
                    TriggerEvent::Utterance(line.to_string())
                }
            }
            // stdin closed: treat as a quit signal
            Ok(None) => TriggerEvent::Quit,
            Err(e) => {
                warn!("failed to read stdin, terminating: {e}");
                TriggerEvent::Quit
            }
        }
    }
}

/// Trigger fed from a fixed script of events. Lets the loop run without a
/// keyboard, e.g. in tests; yields `Quit` once the script is exhausted.
pub struct ScriptedTrigger {
    events: VecDeque<TriggerEvent>,
}

impl ScriptedTrigger {
    pub fn new(events: Vec<TriggerEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

#[async_trait::async_trait]
impl TurnTrigger for ScriptedTrigger {
    async fn next_event(&mut self) -> TriggerEvent {
        self.events.pop_front().unwrap_or(TriggerEvent::Quit)
    }
}
