//! Gemini TTS provider module.
//!
//! Text-to-speech through the Gemini `generateContent` API with audio output.
//!
//! # Supported Models
//!
//! - `gemini-2.5-flash-preview-tts` - Faster and cheaper (default)
//! - `gemini-2.5-pro-preview-tts` - Higher quality
//!
//! # Voices
//!
//! 30 prebuilt voices (Zephyr, Puck, Charon, Kore, ...). Dialogue requests
//! bind exactly two named speakers to voices.
//!
//! # Audio Format
//!
//! Raw PCM, 24kHz 16-bit mono little-endian, wrapped as WAV by `core::audio`.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_tts::core::credential::Credential;
//! use gemini_tts::core::tts::{GeminiTTS, GeminiTTSConfig, SpeechProvider, SynthesisRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tts = GeminiTTS::new(GeminiTTSConfig::default()).unwrap();
//!     let credential = Credential::new("AIza...").unwrap();
//!     let request = SynthesisRequest::build("Hello, world!", None, "Kore", None).unwrap();
//!     let audio = tts.synthesize(&request, &credential).await.unwrap();
//! }
//! ```

mod config;
mod messages;
mod provider;
mod request;

pub use config::{
    DEFAULT_GENERATION_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS, GEMINI_API_BASE_URL, GeminiTTSConfig,
    GeminiTTSModel, GeminiVoice, MULTI_SPEAKER_COUNT,
};
pub use provider::GeminiTTS;
pub use request::{SpeakerAssignment, SynthesisRequest, VoiceConfig, parse_speaker_arg};
