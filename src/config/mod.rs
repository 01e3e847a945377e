//! Configuration module for the gemini-tts binary
//!
//! This module handles configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! Only the shells read configuration. Core operations receive a
//! [`Credential`] and a [`GeminiTTSConfig`] explicitly.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//! - `utils`: Utility functions for configuration parsing
//!
//! # Example
//! ```rust,no_run
//! use gemini_tts::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::PathBuf;

use crate::core::credential::Credential;
use crate::core::tts::{GeminiTTSConfig, GeminiTTSModel, GeminiVoice, TTSResult};

mod env;
mod merge;
mod utils;
mod validation;
mod yaml;

/// Resolved configuration shared by the CLI, the REPL and the web server.
#[derive(Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // Gemini settings
    /// Fallback API key (`GOOGLE_API_KEY`, then `GEMINI_API_KEY`)
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub tts_model: GeminiTTSModel,
    pub generation_model: String,
    pub default_voice: GeminiVoice,
    pub request_timeout_seconds: u64,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: None (CORS disabled, same-origin only)
    pub cors_allowed_origins: Option<String>,
}

/// Implement Drop to zeroize the API key when ServerConfig is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.api_key {
            key.zeroize();
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_base_url", &self.api_base_url)
            .field("tts_model", &self.tts_model)
            .field("generation_model", &self.generation_model)
            .field("default_voice", &self.default_voice)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails (unknown model or voice, zero timeout)
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        // .env is loaded in main.rs at startup, so it already sits beneath the
        // real environment here.
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        validation::validate_base_url(&self.api_base_url)?;
        validation::validate_timeout(self.request_timeout_seconds)?;
        validation::validate_generation_model(&self.generation_model)?;
        validation::validate_cors_origins(&self.cors_allowed_origins)?;
        Ok(())
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether a fallback API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Resolve the credential for one call.
    ///
    /// An explicit, non-blank key wins over the configured one.
    pub fn credential(&self, explicit: Option<&str>) -> TTSResult<Credential> {
        Credential::resolve([explicit, self.api_key.as_deref()])
    }

    /// Connection settings for the Gemini client.
    pub fn gemini_config(&self) -> GeminiTTSConfig {
        GeminiTTSConfig {
            base_url: self.api_base_url.clone(),
            generation_model: self.generation_model.clone(),
            request_timeout_secs: self.request_timeout_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tts::TTSError;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn test_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            api_key: Some("config-key".to_string()),
            api_base_url: "https://generativelanguage.googleapis.com".to_string(),
            tts_model: GeminiTTSModel::Flash,
            generation_model: "gemini-2.0-flash".to_string(),
            default_voice: GeminiVoice::Kore,
            request_timeout_seconds: 60,
            cors_allowed_origins: None,
        }
    }

    #[test]
    fn test_address() {
        let config = test_config();
        assert_eq!(config.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = test_config();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("config-key"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_credential_precedence() {
        let config = test_config();
        assert!(config.credential(Some("explicit")).is_ok());
        assert!(config.credential(Some("   ")).is_ok());
        assert!(config.credential(None).is_ok());

        let mut config = test_config();
        config.api_key = None;
        assert!(matches!(config.credential(None), Err(TTSError::Auth(_))));
        assert!(matches!(config.credential(Some("")), Err(TTSError::Auth(_))));
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_gemini_config() {
        let mut config = test_config();
        config.api_base_url = "http://127.0.0.1:9999".to_string();
        config.request_timeout_seconds = 5;

        let gemini = config.gemini_config();
        assert_eq!(gemini.base_url, "http://127.0.0.1:9999");
        assert_eq!(gemini.generation_model, "gemini-2.0-flash");
        assert_eq!(gemini.request_timeout_secs, 5);
    }

    // Helper to clean up environment variables
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
    fn test_from_file_yaml_only() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let yaml_content = r#"
server:
  host: "0.0.0.0"
  port: 5000

gemini:
  api_key: "yaml-key"
  tts_model: "gemini-2.5-pro-preview-tts"
  default_voice: "puck"
  request_timeout_seconds: 30

security:
  cors_allowed_origins: "http://localhost:3000"
"#;

        fs::write(&config_path, yaml_content).unwrap();

        let config = ServerConfig::from_file(&config_path).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.api_key, Some("yaml-key".to_string()));
        assert_eq!(config.tts_model, GeminiTTSModel::Pro);
        assert_eq!(config.default_voice, GeminiVoice::Puck);
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(
            config.cors_allowed_origins,
            Some("http://localhost:3000".to_string())
        );

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_yaml_overrides_env() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let yaml_content = r#"
server:
  port: 9000

gemini:
  api_key: "yaml-key"
"#;

        fs::write(&config_path, yaml_content).unwrap();

        unsafe {
            env::set_var("HOST", "0.0.0.0");
            env::set_var("PORT", "7000");
            env::set_var("GOOGLE_API_KEY", "env-key");
        }

        let config = ServerConfig::from_file(&config_path).unwrap();

        // YAML overrides ENV
        assert_eq!(config.port, 9000);
        assert_eq!(config.api_key, Some("yaml-key".to_string()));
        // ENV value where YAML is silent
        assert_eq!(config.host, "0.0.0.0");

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_missing_file() {
        cleanup_env_vars();

        let config_path = PathBuf::from("/nonexistent/config.yaml");
        let result = ServerConfig::from_file(&config_path);

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_invalid_yaml() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.yaml");

        fs::write(&config_path, "invalid: yaml: [content").unwrap();

        let result = ServerConfig::from_file(&config_path);

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse YAML")
        );

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_rejects_unknown_voice() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "gemini:\n  default_voice: \"alloy\"\n").unwrap();

        let result = ServerConfig::from_file(&config_path);
        assert!(result.unwrap_err().to_string().contains("alloy"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_rejects_zero_timeout() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "gemini:\n  request_timeout_seconds: 0\n").unwrap();

        let result = ServerConfig::from_file(&config_path);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("REQUEST_TIMEOUT_SECONDS")
        );

        cleanup_env_vars();
    }
}
