use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleRate;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error};

/// Sample rate for captured speech (16kHz, what the transcription models
/// expect)
pub const CAPTURE_SAMPLE_RATE: u32 = 16_000;

/// Bounded-duration audio capture from an input device.
///
/// Implementations yield a single mono i16 PCM clip per call; the caller
/// forwards it unchanged (WAV-wrapped) to the transcription service.
#[async_trait::async_trait]
pub trait AudioCapture: Send + Sync {
    /// Record a clip of the given duration
    async fn capture(&self, duration: Duration) -> Result<Vec<i16>>;

    /// Sample rate of the returned clips, in Hz
    fn sample_rate(&self) -> u32;
}

/// Microphone capture via the default cpal input device
pub struct CpalCapture;

impl CpalCapture {
    /// Create a capture instance, probing that an input device exists.
    ///
    /// A missing device here is an unrecoverable startup failure; device
    /// errors during a later `capture` call are per-turn failures.
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or_else(|| Error::Config("no audio input device available".to_string()))?;
        Ok(Self)
    }
}

#[async_trait::async_trait]
impl AudioCapture for CpalCapture {
    async fn capture(&self, duration: Duration) -> Result<Vec<i16>> {
        // The cpal stream is not Send, so the recording runs on its own
        // OS thread and hands the clip back through a oneshot channel.
        let (tx, rx) = tokio::sync::oneshot::channel();

        std::thread::spawn(move || {
            let _ = tx.send(record_clip(duration));
        });

        rx.await
            .map_err(|_| Error::Capture("capture thread exited unexpectedly".to_string()))?
    }

    fn sample_rate(&self) -> u32 {
        CAPTURE_SAMPLE_RATE
    }
}

/// Capture stand-in for text-only sessions (no audio device required).
/// Any attempt to record reports a capture failure and the loop returns
/// to listening.
pub struct DisabledCapture;

#[async_trait::async_trait]
impl AudioCapture for DisabledCapture {
    async fn capture(&self, _duration: Duration) -> Result<Vec<i16>> {
        Err(Error::Capture(
            "audio capture is disabled in text-only mode".to_string(),
        ))
    }

    fn sample_rate(&self) -> u32 {
        CAPTURE_SAMPLE_RATE
    }
}

/// Record a bounded clip from the default input device (blocking)
fn record_clip(duration: Duration) -> Result<Vec<i16>> {
    let host = cpal::default_host();

    let device = host
        .default_input_device()
        .ok_or_else(|| Error::Capture("no input device available".to_string()))?;

    let supported = device
        .supported_input_configs()
        .map_err(|e| Error::Capture(e.to_string()))?
        .find(|c| {
            c.channels() == 1
                && c.min_sample_rate() <= SampleRate(CAPTURE_SAMPLE_RATE)
                && c.max_sample_rate() >= SampleRate(CAPTURE_SAMPLE_RATE)
        })
        .ok_or_else(|| Error::Capture("no 16kHz mono input config available".to_string()))?;

    let config = supported
        .with_sample_rate(SampleRate(CAPTURE_SAMPLE_RATE))
        .config();

    debug!(
        device = device.name().unwrap_or_default(),
        sample_rate = CAPTURE_SAMPLE_RATE,
        duration_ms = duration.as_millis() as u64,
        "recording clip"
    );

    let buffer: Arc<Mutex<Vec<i16>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buffer);

    let stream = device
        .build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if let Ok(mut buf) = sink.lock() {
                    buf.extend(
                        data.iter()
                            .map(|&s| (s * 32767.0).clamp(-32768.0, 32767.0) as i16),
                    );
                }
            },
            |err| {
                error!("input stream error: {err}");
            },
            None,
        )
        .map_err(|e| Error::Capture(e.to_string()))?;

    stream.play().map_err(|e| Error::Capture(e.to_string()))?;
    std::thread::sleep(duration);
    drop(stream);

    let samples = buffer.lock().map(|buf| buf.clone()).unwrap_or_default();
    debug!(samples = samples.len(), "clip recorded");

    Ok(samples)
}
