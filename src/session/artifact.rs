use std::path::PathBuf;

/// The persisted audio output of one assistant utterance.
///
/// Created fresh per turn; not mutated after write-completion. This is the
/// only durable artifact a session produces.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Resolved filesystem path the audio was written to
    pub path: PathBuf,

    /// Total bytes written
    pub bytes_written: u64,
}
