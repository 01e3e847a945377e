mod base;
pub mod gemini;

pub use base::{
    BITS_PER_SAMPLE, CHANNELS, SAMPLE_RATE, SpeechProvider, SynthesisResult, TTSError, TTSResult,
};
pub use gemini::{
    GEMINI_API_BASE_URL, GeminiTTS, GeminiTTSConfig, GeminiTTSModel, GeminiVoice,
    MULTI_SPEAKER_COUNT, SpeakerAssignment, SynthesisRequest, VoiceConfig, parse_speaker_arg,
};

use std::sync::Arc;

/// Shared provider handle used by the shells.
pub type BoxedProvider = Arc<dyn SpeechProvider>;

/// Factory function to create a speech provider.
///
/// # Supported Providers
///
/// - `"gemini"` or `"google-gemini"` - Gemini TTS via `generateContent`
pub fn create_speech_provider(
    provider_type: &str,
    config: GeminiTTSConfig,
) -> TTSResult<BoxedProvider> {
    match provider_type.to_lowercase().as_str() {
        "gemini" | "google-gemini" => Ok(Arc::new(GeminiTTS::new(config)?)),
        other => Err(TTSError::Validation(format!(
            "Unsupported speech provider: {other}. Supported providers: {}",
            get_supported_speech_providers().join(", ")
        ))),
    }
}

/// Get the list of supported speech providers.
pub fn get_supported_speech_providers() -> Vec<&'static str> {
    vec!["gemini"]
}
