use async_trait::async_trait;

use super::gemini::SynthesisRequest;
use crate::core::credential::Credential;

/// Sample rate of every PCM payload returned by the Gemini TTS models.
pub const SAMPLE_RATE: u32 = 24_000;
/// Channel count of the PCM payload.
pub const CHANNELS: u16 = 1;
/// Bit depth of the PCM payload (signed little-endian).
pub const BITS_PER_SAMPLE: u16 = 16;

/// Decoded audio returned by a synthesis call.
///
/// Produced by [`SpeechProvider::synthesize`] and consumed immediately by the
/// WAV writer; never retained beyond the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    /// Raw signed 16-bit little-endian PCM samples
    pub data: Vec<u8>,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl SynthesisResult {
    /// Wrap raw mono PCM bytes at the fixed output format.
    ///
    /// Fails with [`TTSError::Api`] when the payload does not hold a whole
    /// number of frames, since the WAV data chunk must match it byte for byte.
    pub fn from_pcm(data: Vec<u8>) -> TTSResult<Self> {
        Self::from_pcm_with_channels(data, CHANNELS)
    }

    pub fn from_pcm_with_channels(data: Vec<u8>, channels: u16) -> TTSResult<Self> {
        if channels == 0 || channels > 2 {
            return Err(TTSError::Api(format!(
                "unsupported channel count: {channels}"
            )));
        }
        let frame_size = usize::from(channels) * usize::from(BITS_PER_SAMPLE / 8);
        if data.len() % frame_size != 0 {
            return Err(TTSError::Api(format!(
                "audio payload of {} bytes is not aligned to {}-byte frames",
                data.len(),
                frame_size
            )));
        }

        Ok(Self {
            data,
            sample_rate: SAMPLE_RATE,
            channels,
            bits_per_sample: BITS_PER_SAMPLE,
        })
    }

    /// Number of sample frames in the payload.
    ///
    /// Zero for a hand-built result with no channels or sub-byte samples.
    pub fn frame_count(&self) -> usize {
        let frame_size = usize::from(self.channels) * usize::from(self.bits_per_sample / 8);
        self.data.len().checked_div(frame_size).unwrap_or(0)
    }

    /// Playback duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        (self.frame_count() as u64 * 1000)
            .checked_div(u64::from(self.sample_rate))
            .unwrap_or(0)
    }
}

/// TTS-specific error types
///
/// Every variant is terminal for the call that produced it; nothing in this
/// crate retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TTSError {
    /// Bad local input: empty text, unknown voice or model, wrong speaker count
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or rejected credential
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Remote call failed or the response had an unexpected shape
    #[error("API error: {0}")]
    Api(String),

    /// Transport-level failure (no connectivity, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Writing audio to its destination failed
    #[error("Failed to write audio to {path}: {message}")]
    Io { path: String, message: String },
}

impl TTSError {
    /// Short hint shown to end users alongside the error.
    pub fn hint(&self) -> &'static str {
        match self {
            TTSError::Validation(_) => "Check the text, voice, model and speaker arguments.",
            TTSError::Auth(_) => {
                "Check your API key (--api-key, GOOGLE_API_KEY or GEMINI_API_KEY)."
            }
            TTSError::Api(_) => "The Gemini API rejected the request or returned no audio.",
            TTSError::Network(_) => "Check your internet connection and try again.",
            TTSError::Io { .. } => {
                "Check that the output path is writable and the disk is not full."
            }
        }
    }
}

/// Result type for TTS operations
pub type TTSResult<T> = Result<T, TTSError>;

/// Remote speech backend.
///
/// Each call is an independent request/response round trip; implementations
/// hold no per-call state so a single instance can be shared across tasks.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize speech for a validated request.
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        credential: &Credential,
    ) -> TTSResult<SynthesisResult>;

    /// Run a plain text-generation prompt and return the generated text.
    async fn generate_text(&self, prompt: &str, credential: &Credential) -> TTSResult<String>;

    /// Provider metadata for diagnostics and the voices endpoint.
    fn get_provider_info(&self) -> serde_json::Value;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pcm_sets_fixed_format() {
        let result = SynthesisResult::from_pcm(vec![0u8; 480]).unwrap();
        assert_eq!(result.sample_rate, 24_000);
        assert_eq!(result.channels, 1);
        assert_eq!(result.bits_per_sample, 16);
        assert_eq!(result.frame_count(), 240);
        assert_eq!(result.duration_ms(), 10);
    }

    #[test]
    fn test_from_pcm_rejects_partial_sample() {
        let err = SynthesisResult::from_pcm(vec![0u8; 3]).unwrap_err();
        assert!(matches!(err, TTSError::Api(_)));
    }

    #[test]
    fn test_stereo_frames() {
        let result = SynthesisResult::from_pcm_with_channels(vec![0u8; 96_000], 2).unwrap();
        assert_eq!(result.frame_count(), 24_000);
        assert_eq!(result.duration_ms(), 1000);

        assert!(SynthesisResult::from_pcm_with_channels(vec![0u8; 6], 2).is_err());
        assert!(SynthesisResult::from_pcm_with_channels(vec![0u8; 4], 3).is_err());
    }

    #[test]
    fn test_hand_built_result_without_channels() {
        let result = SynthesisResult {
            data: vec![0u8; 480],
            sample_rate: 0,
            channels: 0,
            bits_per_sample: 16,
        };
        assert_eq!(result.frame_count(), 0);
        assert_eq!(result.duration_ms(), 0);
    }

    #[test]
    fn test_error_display() {
        let err = TTSError::Api("no audio data in response".to_string());
        assert_eq!(err.to_string(), "API error: no audio data in response");

        let err = TTSError::Io {
            path: "out.wav".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to write audio to out.wav: permission denied"
        );
    }
}
