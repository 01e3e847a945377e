use super::ServerConfig;
use super::merge::merge_config;

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads configuration from environment variables, with defaults for
    /// everything except the API key. The `.env` file is loaded by `main`
    /// before this runs.
    ///
    /// # Errors
    /// Returns an error if:
    /// - `PORT` or `REQUEST_TIMEOUT_SECONDS` are malformed
    /// - `GEMINI_TTS_MODEL` or `GEMINI_DEFAULT_VOICE` name an unknown entry
    /// - Validation of the merged configuration fails
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge_config(None)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tts::{GeminiTTSModel, GeminiVoice};
    use serial_test::serial;
    use std::env;

    // Helper to clean up environment variables after tests
    fn cleanup_env_vars() {
        unsafe {
            env::remove_var("HOST");
            env::remove_var("PORT");
            env::remove_var("GOOGLE_API_KEY");
            env::remove_var("GEMINI_API_KEY");
            env::remove_var("GEMINI_API_BASE_URL");
            env::remove_var("GEMINI_TTS_MODEL");
            env::remove_var("GEMINI_GENERATION_MODEL");
            env::remove_var("GEMINI_DEFAULT_VOICE");
            env::remove_var("REQUEST_TIMEOUT_SECONDS");
            env::remove_var("CORS_ALLOWED_ORIGINS");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        cleanup_env_vars();

        let config = ServerConfig::from_env().expect("Should load config");
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert!(!config.has_api_key());
        assert_eq!(config.tts_model, GeminiTTSModel::Flash);
        assert_eq!(config.default_voice, GeminiVoice::Kore);

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        cleanup_env_vars();

        unsafe {
            env::set_var("HOST", "0.0.0.0");
            env::set_var("PORT", "3000");
            env::set_var("GOOGLE_API_KEY", "env-key");
            env::set_var("GEMINI_API_BASE_URL", "http://localhost:4010");
            env::set_var("GEMINI_TTS_MODEL", "gemini-2.5-pro-preview-tts");
            env::set_var("GEMINI_GENERATION_MODEL", "gemini-2.5-flash");
            env::set_var("GEMINI_DEFAULT_VOICE", "zephyr");
            env::set_var("REQUEST_TIMEOUT_SECONDS", "5");
            env::set_var("CORS_ALLOWED_ORIGINS", "*");
        }

        let config = ServerConfig::from_env().expect("Should load config");
        assert_eq!(config.address(), "0.0.0.0:3000");
        assert!(config.has_api_key());
        assert_eq!(config.api_base_url, "http://localhost:4010");
        assert_eq!(config.tts_model, GeminiTTSModel::Pro);
        assert_eq!(config.generation_model, "gemini-2.5-flash");
        assert_eq!(config.default_voice, GeminiVoice::Zephyr);
        assert_eq!(config.request_timeout_seconds, 5);
        assert_eq!(config.cors_allowed_origins.as_deref(), Some("*"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_voice() {
        cleanup_env_vars();

        unsafe {
            env::set_var("GEMINI_DEFAULT_VOICE", "shimmer");
        }
        let result = ServerConfig::from_env();
        assert!(result.is_err());

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_base_url() {
        cleanup_env_vars();

        unsafe {
            env::set_var("GEMINI_API_BASE_URL", "ftp://example.com");
        }
        let result = ServerConfig::from_env();
        assert!(result.unwrap_err().to_string().contains("GEMINI_API_BASE_URL"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_malformed_base_urls() {
        for bad in ["http://", "https://exa mple.com", "http://[::1"] {
            cleanup_env_vars();
            unsafe {
                env::set_var("GEMINI_API_BASE_URL", bad);
            }
            let result = ServerConfig::from_env();
            assert!(result.is_err(), "accepted {bad:?}");
        }

        cleanup_env_vars();
    }
}
