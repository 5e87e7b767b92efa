use crate::error::{Error, Result};

/// Encode mono i16 PCM samples as WAV bytes for the transcription API
pub fn pcm_to_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| Error::Capture(format!("failed to encode WAV: {e}")))?;

        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| Error::Capture(format!("failed to encode WAV: {e}")))?;
        }

        writer
            .finalize()
            .map_err(|e| Error::Capture(format!("failed to finalize WAV: {e}")))?;
    }

    Ok(cursor.into_inner())
}
