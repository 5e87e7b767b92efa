pub mod capture;
pub mod wav;

pub use capture::{AudioCapture, CpalCapture, DisabledCapture, CAPTURE_SAMPLE_RATE};
pub use wav::pcm_to_wav;
