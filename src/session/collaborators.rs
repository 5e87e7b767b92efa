use crate::error::Result;
use bytes::Bytes;
use futures::stream::BoxStream;

use super::transcript::Transcript;

/// Synthesized audio delivered as a stream of chunks, so the session can
/// write it to disk incrementally.
pub type AudioStream = BoxStream<'static, Result<Bytes>>;

/// Speech-recognition service contract.
///
/// Implementations are stateless request/response collaborators; an empty
/// string is a valid result meaning "no speech detected".
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a WAV-encoded audio clip to UTF-8 text
    async fn transcribe(&self, wav_bytes: &[u8]) -> Result<String>;
}

/// Chat-completion service contract.
///
/// The full ordered transcript (including the system turn) is the request
/// payload on every call; no server-side session affinity is assumed.
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    /// Produce the next assistant utterance. Fails on service error or
    /// an empty completion.
    async fn complete(&self, transcript: &Transcript) -> Result<String>;
}

/// Speech-synthesis service contract.
#[async_trait::async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize text to an audio byte stream using the given voice and
    /// delivery instructions
    async fn synthesize(&self, text: &str, voice: &str, instructions: &str)
        -> Result<AudioStream>;
}
