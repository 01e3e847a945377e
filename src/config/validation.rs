use url::Url;

use crate::core::tts::{GeminiTTSModel, GeminiVoice};

/// Parse the TTS model, defaulting to flash when unset.
pub fn parse_tts_model(value: Option<&str>) -> Result<GeminiTTSModel, Box<dyn std::error::Error>> {
    GeminiTTSModel::parse_or_default(value)
        .map_err(|e| format!("Invalid GEMINI_TTS_MODEL: {e}").into())
}

/// Parse the default voice, defaulting to Kore when unset.
pub fn parse_default_voice(value: Option<&str>) -> Result<GeminiVoice, Box<dyn std::error::Error>> {
    match value {
        None => Ok(GeminiVoice::default()),
        Some(voice) => voice
            .parse()
            .map_err(|e| format!("Invalid GEMINI_DEFAULT_VOICE: {e}").into()),
    }
}

/// Parse an absolute http(s) URL that names a host.
fn parse_http_url(value: &str) -> Result<Url, String> {
    let parsed = Url::parse(value).map_err(|e| e.to_string())?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(format!("unsupported scheme '{}'", parsed.scheme()));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err("missing host".to_string());
    }
    Ok(parsed)
}

/// Validate the API base URL
///
/// Must be an absolute http(s) URL with a host.
pub fn validate_base_url(base_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    parse_http_url(base_url)
        .map_err(|e| format!("Invalid GEMINI_API_BASE_URL '{base_url}': {e}"))?;
    Ok(())
}

/// Validate the request timeout
pub fn validate_timeout(seconds: u64) -> Result<(), Box<dyn std::error::Error>> {
    if seconds == 0 {
        return Err("REQUEST_TIMEOUT_SECONDS must be greater than zero".into());
    }
    Ok(())
}

/// Validate the text generation model identifier
///
/// Only checked for shape; the remote service decides whether it exists.
pub fn validate_generation_model(model: &str) -> Result<(), Box<dyn std::error::Error>> {
    if model.trim().is_empty() || model.contains(char::is_whitespace) || model.contains('/') {
        return Err(format!("Invalid GEMINI_GENERATION_MODEL: '{model}'").into());
    }
    Ok(())
}

/// Validate CORS allowed origins
///
/// Accepts "*" or a comma-separated list of http(s) origins.
pub fn validate_cors_origins(origins: &Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(origins) = origins else {
        return Ok(());
    };

    if origins.trim() == "*" {
        return Ok(());
    }

    for origin in origins.split(',').map(str::trim) {
        if origin.is_empty() {
            return Err("CORS_ALLOWED_ORIGINS contains an empty entry".into());
        }
        parse_http_url(origin).map_err(|e| format!("Invalid CORS origin '{origin}': {e}"))?;
    }

    Ok(())
}
