// Integration tests for the SessionLoop state machine
//
// These tests drive the loop with a scripted trigger and fake capture,
// transcription, completion and synthesis collaborators: no keyboard,
// microphone or network required.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use voice_loop::{
    AudioCapture, AudioStream, ConversationSession, Error, Responder, ScriptedTrigger,
    SessionConfig, SessionLoop, SessionState, Synthesizer, Transcriber, Transcript, TriggerEvent,
};

struct FakeCapture {
    fail: bool,
}

#[async_trait]
impl AudioCapture for FakeCapture {
    async fn capture(&self, _duration: Duration) -> voice_loop::Result<Vec<i16>> {
        if self.fail {
            return Err(Error::Capture("device busy".to_string()));
        }
        Ok(vec![0i16; 1600])
    }

    fn sample_rate(&self) -> u32 {
        16000
    }
}

struct FakeTranscriber {
    text: String,
    fail: bool,
}

impl FakeTranscriber {
    fn returning(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            text: String::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(&self, _wav_bytes: &[u8]) -> voice_loop::Result<String> {
        if self.fail {
            return Err(Error::Transcription("service unavailable".to_string()));
        }
        Ok(self.text.clone())
    }
}

struct FakeResponder;

#[async_trait]
impl Responder for FakeResponder {
    async fn complete(&self, transcript: &Transcript) -> voice_loop::Result<String> {
        Ok(format!("reply to: {}", transcript.last().unwrap().content))
    }
}

struct FailingResponder;

#[async_trait]
impl Responder for FailingResponder {
    async fn complete(&self, _transcript: &Transcript) -> voice_loop::Result<String> {
        Err(Error::Completion("service unavailable".to_string()))
    }
}

struct FakeSynthesizer;

#[async_trait]
impl Synthesizer for FakeSynthesizer {
    async fn synthesize(
        &self,
        _text: &str,
        _voice: &str,
        _instructions: &str,
    ) -> voice_loop::Result<AudioStream> {
        Ok(futures::stream::iter(vec![Ok(Bytes::from_static(b"audio"))]).boxed())
    }
}

fn build_loop(
    output_dir: &TempDir,
    capture: FakeCapture,
    transcriber: FakeTranscriber,
    responder: Arc<dyn Responder>,
    events: Vec<TriggerEvent>,
) -> SessionLoop {
    let config = SessionConfig {
        system_prompt: "You are terse.".to_string(),
        output_path: output_dir
            .path()
            .join("turn-{turn}.mp3")
            .to_string_lossy()
            .to_string(),
        ..SessionConfig::default()
    };

    let session = ConversationSession::new(config, responder, Arc::new(FakeSynthesizer));

    SessionLoop::new(
        session,
        Box::new(capture),
        Arc::new(transcriber),
        Box::new(ScriptedTrigger::new(events)),
        Duration::from_millis(10),
    )
}

#[tokio::test]
async fn test_direct_text_turn_runs_the_pipeline() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session_loop = build_loop(
        &temp_dir,
        FakeCapture { fail: false },
        FakeTranscriber::returning("unused"),
        Arc::new(FakeResponder),
        vec![TriggerEvent::Utterance("Hi".to_string()), TriggerEvent::Quit],
    );

    session_loop.run().await?;

    let session = session_loop.into_session();
    assert_eq!(session.turns_completed(), 1);
    assert_eq!(session.transcript().len(), 3);
    assert_eq!(session.transcript().turns()[1].content, "Hi");
    assert_eq!(session.transcript().turns()[2].content, "reply to: Hi");
    assert!(temp_dir.path().join("turn-000.mp3").exists());

    Ok(())
}

#[tokio::test]
async fn test_voice_turn_goes_through_capture_and_transcription() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session_loop = build_loop(
        &temp_dir,
        FakeCapture { fail: false },
        FakeTranscriber::returning("Hi there"),
        Arc::new(FakeResponder),
        vec![TriggerEvent::StartTurn],
    );

    session_loop.run().await?;

    let session = session_loop.into_session();
    assert_eq!(session.turns_completed(), 1);
    assert_eq!(session.transcript().turns()[1].content, "Hi there");

    Ok(())
}

#[tokio::test]
async fn test_empty_transcription_is_a_noop_turn() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session_loop = build_loop(
        &temp_dir,
        FakeCapture { fail: false },
        FakeTranscriber::returning("   "),
        Arc::new(FakeResponder),
        vec![TriggerEvent::StartTurn],
    );

    session_loop.run().await?;

    // Whitespace-only transcription: no transcript mutation, no turn
    let session = session_loop.into_session();
    assert_eq!(session.turns_completed(), 0);
    assert_eq!(session.transcript().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_capture_failure_returns_to_listening() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session_loop = build_loop(
        &temp_dir,
        FakeCapture { fail: true },
        FakeTranscriber::returning("unused"),
        Arc::new(FakeResponder),
        // The failed capture must not prevent the following text turn
        vec![
            TriggerEvent::StartTurn,
            TriggerEvent::Utterance("Hi".to_string()),
        ],
    );

    session_loop.run().await?;

    let session = session_loop.into_session();
    assert_eq!(session.turns_completed(), 1);
    assert_eq!(session.transcript().len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_transcription_failure_returns_to_listening() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session_loop = build_loop(
        &temp_dir,
        FakeCapture { fail: false },
        FakeTranscriber::failing(),
        Arc::new(FakeResponder),
        vec![
            TriggerEvent::StartTurn,
            TriggerEvent::Utterance("Hi".to_string()),
        ],
    );

    session_loop.run().await?;

    let session = session_loop.into_session();
    assert_eq!(session.turns_completed(), 1);
    assert_eq!(session.transcript().turns()[1].content, "Hi");

    Ok(())
}

#[tokio::test]
async fn test_completion_failure_does_not_terminate_the_loop() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session_loop = build_loop(
        &temp_dir,
        FakeCapture { fail: false },
        FakeTranscriber::returning("unused"),
        Arc::new(FailingResponder),
        vec![
            TriggerEvent::Utterance("Hi".to_string()),
            TriggerEvent::Utterance("Still there?".to_string()),
        ],
    );

    // Both turns fail at completion, but the loop finishes cleanly
    session_loop.run().await?;

    let session = session_loop.into_session();
    assert_eq!(session.turns_completed(), 0);
    // Each failed turn still recorded its user utterance
    assert_eq!(session.transcript().len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_exhausted_script_terminates_the_loop() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session_loop = build_loop(
        &temp_dir,
        FakeCapture { fail: false },
        FakeTranscriber::returning("unused"),
        Arc::new(FakeResponder),
        vec![],
    );

    session_loop.run().await?;

    let session = session_loop.into_session();
    assert_eq!(session.state(), SessionState::Terminated);
    assert_eq!(session.transcript().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_shutdown_flag_is_honored_at_the_turn_boundary() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session_loop = build_loop(
        &temp_dir,
        FakeCapture { fail: false },
        FakeTranscriber::returning("unused"),
        Arc::new(FakeResponder),
        vec![TriggerEvent::Utterance("never processed".to_string())],
    );

    session_loop.shutdown_flag().store(true, Ordering::SeqCst);
    session_loop.run().await?;

    // The loop terminated before listening for the scripted event
    let session = session_loop.into_session();
    assert_eq!(session.turns_completed(), 0);
    assert_eq!(session.transcript().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_two_turns_accumulate_context_and_artifacts() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session_loop = build_loop(
        &temp_dir,
        FakeCapture { fail: false },
        FakeTranscriber::returning("unused"),
        Arc::new(FakeResponder),
        vec![
            TriggerEvent::Utterance("Hi".to_string()),
            TriggerEvent::Utterance("How are you?".to_string()),
        ],
    );

    session_loop.run().await?;

    let session = session_loop.into_session();
    assert_eq!(session.turns_completed(), 2);
    assert_eq!(session.transcript().len(), 5);
    assert!(temp_dir.path().join("turn-000.mp3").exists());
    assert!(temp_dir.path().join("turn-001.mp3").exists());

    Ok(())
}
