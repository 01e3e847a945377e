//! WAV container output for synthesized PCM.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use tracing::debug;

use crate::core::tts::{SynthesisResult, TTSError, TTSResult};

fn wav_spec(result: &SynthesisResult) -> hound::WavSpec {
    hound::WavSpec {
        channels: result.channels,
        sample_rate: result.sample_rate,
        bits_per_sample: result.bits_per_sample,
        sample_format: hound::SampleFormat::Int,
    }
}

fn write_samples<W: Write + Seek>(
    mut writer: hound::WavWriter<W>,
    result: &SynthesisResult,
) -> Result<(), hound::Error> {
    for frame in result.data.chunks_exact(2) {
        writer.write_sample(i16::from_le_bytes([frame[0], frame[1]]))?;
    }
    writer.finalize()
}

fn io_error(path: &str, e: hound::Error) -> TTSError {
    TTSError::Io {
        path: path.to_string(),
        message: e.to_string(),
    }
}

/// Write `result` as a WAV file, replacing any existing file at `path`.
pub fn write_wav(result: &SynthesisResult, path: impl AsRef<Path>) -> TTSResult<()> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let writer =
        hound::WavWriter::create(path, wav_spec(result)).map_err(|e| io_error(&shown, e))?;
    write_samples(writer, result).map_err(|e| io_error(&shown, e))?;

    debug!(path = %shown, bytes = result.data.len(), "Wrote WAV file");
    Ok(())
}

/// Encode `result` as an in-memory WAV file.
pub fn encode_wav(result: &SynthesisResult) -> TTSResult<Vec<u8>> {
    let mut buffer = Vec::with_capacity(result.data.len() + 44);
    let writer = hound::WavWriter::new(Cursor::new(&mut buffer), wav_spec(result))
        .map_err(|e| io_error("<memory>", e))?;
    write_samples(writer, result).map_err(|e| io_error("<memory>", e))?;
    Ok(buffer)
}
