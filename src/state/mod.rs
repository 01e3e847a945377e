use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::tts::{BoxedProvider, TTSResult, create_speech_provider};

/// Application state shared across handlers
///
/// Immutable after construction; request handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    /// Speech backend used by every TTS route
    pub provider: BoxedProvider,
}

impl AppState {
    /// Build state with the Gemini provider described by `config`.
    pub fn new(config: ServerConfig) -> TTSResult<Arc<Self>> {
        let provider = create_speech_provider("gemini", config.gemini_config())?;
        Ok(Self::with_provider(config, provider))
    }

    /// Build state around an existing provider (tests, alternative backends).
    pub fn with_provider(config: ServerConfig, provider: BoxedProvider) -> Arc<Self> {
        Arc::new(Self { config, provider })
    }
}
