pub mod audio;
pub mod content;
pub mod credential;
pub mod tts;

// Re-export commonly used types for convenience
pub use audio::{encode_wav, write_wav};
pub use content::{
    GeneratedSpeech, VoiceSelection, generate_and_speak, generate_content, generate_speech,
    generation_prompt,
};
pub use credential::Credential;
pub use tts::{
    BoxedProvider, GeminiTTS, GeminiTTSConfig, GeminiTTSModel, GeminiVoice, SpeechProvider,
    SynthesisRequest, SynthesisResult, TTSError, TTSResult, create_speech_provider,
};
