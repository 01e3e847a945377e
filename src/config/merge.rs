use super::ServerConfig;
use super::utils::{env_var, non_blank};
use super::validation::{parse_default_voice, parse_tts_model};
use super::yaml::YamlConfig;
use crate::core::tts::gemini::{
    DEFAULT_GENERATION_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS, GEMINI_API_BASE_URL,
};

/// Merge YAML configuration with environment variables
///
/// Priority order (highest to lowest):
/// 1. YAML configuration values
/// 2. Environment variables
/// 3. Default values
///
/// Blank values at any level count as unset.
pub fn merge_config(
    yaml_config: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let yaml = yaml_config.unwrap_or_default();
    let gemini = yaml.gemini.unwrap_or_default();

    // Helper macro to get value with priority: YAML > ENV > Default
    macro_rules! get_value {
        ($env_var:expr, $yaml_value:expr, $default:expr) => {
            non_blank($yaml_value)
                .or_else(|| env_var($env_var))
                .unwrap_or_else(|| $default.to_string())
        };
    }

    // Helper macro for optional values: YAML > ENV
    macro_rules! get_optional {
        ($env_var:expr, $yaml_value:expr) => {
            non_blank($yaml_value).or_else(|| env_var($env_var))
        };
    }

    // Server configuration
    let host = get_value!(
        "HOST",
        yaml.server.as_ref().and_then(|s| s.host.clone()),
        "127.0.0.1"
    );

    let port = if let Some(yaml_port) = yaml.server.as_ref().and_then(|s| s.port) {
        yaml_port
    } else if let Some(port_str) = env_var("PORT") {
        port_str
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT environment variable: {e}"))?
    } else {
        8080
    };

    // Gemini configuration
    let api_key = get_optional!("GOOGLE_API_KEY", gemini.api_key.clone())
        .or_else(|| env_var("GEMINI_API_KEY"));

    let api_base_url = get_value!(
        "GEMINI_API_BASE_URL",
        gemini.base_url.clone(),
        GEMINI_API_BASE_URL
    );

    let tts_model = parse_tts_model(
        get_optional!("GEMINI_TTS_MODEL", gemini.tts_model.clone()).as_deref(),
    )?;

    let generation_model = get_value!(
        "GEMINI_GENERATION_MODEL",
        gemini.generation_model.clone(),
        DEFAULT_GENERATION_MODEL
    );

    let default_voice = parse_default_voice(
        get_optional!("GEMINI_DEFAULT_VOICE", gemini.default_voice.clone()).as_deref(),
    )?;

    let request_timeout_seconds = if let Some(seconds) = gemini.request_timeout_seconds {
        seconds
    } else if let Some(value) = env_var("REQUEST_TIMEOUT_SECONDS") {
        value
            .parse::<u64>()
            .map_err(|e| format!("Invalid REQUEST_TIMEOUT_SECONDS environment variable: {e}"))?
    } else {
        DEFAULT_REQUEST_TIMEOUT_SECS
    };

    // Security configuration
    let cors_allowed_origins = get_optional!(
        "CORS_ALLOWED_ORIGINS",
        yaml.security
            .as_ref()
            .and_then(|s| s.cors_allowed_origins.clone())
    );

    Ok(ServerConfig {
        host,
        port,
        api_key,
        api_base_url,
        tts_model,
        generation_model,
        default_voice,
        request_timeout_seconds,
        cors_allowed_origins,
    })
}
