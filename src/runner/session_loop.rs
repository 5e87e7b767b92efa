use super::trigger::{TriggerEvent, TurnTrigger};
use crate::audio::{pcm_to_wav, AudioCapture};
use crate::error::{Error, Result};
use crate::session::{ConversationSession, Transcriber};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Loop state. `Terminated` is absorbing; every per-turn failure routes
/// back through `Idle` to `Listening`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Listening,
    Capturing,
    Transcribing,
    Processing,
    Terminated,
}

/// The outer control loop: reads user intent, sources each turn's input
/// from direct text or the capture + transcription sub-pipeline, and
/// drives the session one turn at a time until a quit signal.
pub struct SessionLoop {
    session: ConversationSession,
    capture: Box<dyn AudioCapture>,
    transcriber: Arc<dyn Transcriber>,
    trigger: Box<dyn TurnTrigger>,
    capture_duration: Duration,

    /// Cooperative shutdown, honored only at idle/listening boundaries
    shutdown: Arc<AtomicBool>,

    state: LoopState,
}

impl SessionLoop {
    pub fn new(
        session: ConversationSession,
        capture: Box<dyn AudioCapture>,
        transcriber: Arc<dyn Transcriber>,
        trigger: Box<dyn TurnTrigger>,
        capture_duration: Duration,
    ) -> Self {
        Self {
            session,
            capture,
            transcriber,
            trigger,
            capture_duration,
            shutdown: Arc::new(AtomicBool::new(false)),
            state: LoopState::Idle,
        }
    }

    /// Flag that requests termination at the next turn boundary. A signal
    /// received during a turn is queued and honored once the turn
    /// completes or fails.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Consume the loop, handing back the session (e.g. to render the
    /// final transcript)
    pub fn into_session(self) -> ConversationSession {
        self.session
    }

    /// Drive turns until a quit signal or a fatal error.
    ///
    /// Per-turn failures are reported and the loop returns to listening;
    /// only fatal errors abort.
    pub async fn run(&mut self) -> Result<()> {
        info!("session loop started");

        loop {
            self.state = LoopState::Idle;
            if self.shutdown.load(Ordering::SeqCst) {
                info!("shutdown requested, terminating");
                break;
            }

            self.state = LoopState::Listening;
            self.session.await_input();
            let event = self.trigger.next_event().await;

            let utterance = match event {
                TriggerEvent::Quit => {
                    info!("quit signal received");
                    break;
                }
                TriggerEvent::Utterance(text) => text,
                TriggerEvent::StartTurn => match self.capture_and_transcribe().await {
                    Ok(Some(text)) => text,
                    Ok(None) => {
                        println!("(no speech detected)");
                        continue;
                    }
                    Err(e) => {
                        report_failure(&e);
                        if e.is_fatal() {
                            self.state = LoopState::Terminated;
                            return Err(e);
                        }
                        continue;
                    }
                },
            };

            let utterance = utterance.trim().to_string();
            if utterance.is_empty() {
                continue;
            }

            self.state = LoopState::Processing;
            match self.session.run_turn(&utterance).await {
                Ok((reply, artifact)) => {
                    println!("assistant: {reply}");
                    println!(
                        "(saved {} bytes to {})",
                        artifact.bytes_written,
                        artifact.path.display()
                    );
                }
                Err(e) => {
                    report_failure(&e);
                    if e.is_fatal() {
                        self.state = LoopState::Terminated;
                        return Err(e);
                    }
                }
            }
        }

        self.state = LoopState::Terminated;
        self.session.terminate();
        info!("session loop terminated");

        Ok(())
    }

    /// Record a clip and transcribe it. `Ok(None)` means no speech was
    /// detected; the turn is a no-op and the transcript is untouched.
    async fn capture_and_transcribe(&mut self) -> Result<Option<String>> {
        self.state = LoopState::Capturing;
        println!(
            "(listening for {} second(s)...)",
            self.capture_duration.as_secs()
        );

        let samples = self.capture.capture(self.capture_duration).await?;

        self.state = LoopState::Transcribing;
        let wav = pcm_to_wav(&samples, self.capture.sample_rate())?;
        let text = self.transcriber.transcribe(&wav).await?;

        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        println!("you: {text}");
        Ok(Some(text.to_string()))
    }
}

/// Every recoverable failure produces an immediate notification naming
/// the failed step; the session never silently drops a turn.
fn report_failure(e: &Error) {
    error!(step = e.step(), "turn failed: {e}");
    println!("(turn failed during {}: {e})", e.step());
}
