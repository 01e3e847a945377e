//! Gemini TTS Provider Implementation
//!
//! Implements the `SpeechProvider` trait over the Gemini `generateContent`
//! REST endpoint. One HTTP call per invocation, no retry.

use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::config::{GeminiTTSConfig, GeminiTTSModel, GeminiVoice, MULTI_SPEAKER_COUNT};
use super::messages::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};
use super::request::{SynthesisRequest, VoiceConfig};
use crate::core::credential::Credential;
use crate::core::tts::base::{SpeechProvider, SynthesisResult, TTSError, TTSResult};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini text-to-speech client
///
/// Cheap to share: the inner `reqwest::Client` is reused across calls.
#[derive(Debug, Clone)]
pub struct GeminiTTS {
    config: GeminiTTSConfig,
    http_client: reqwest::Client,
}

impl GeminiTTS {
    /// Create a client for the given connection settings.
    pub fn new(config: GeminiTTSConfig) -> TTSResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TTSError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GeminiTTSConfig {
        &self.config
    }

    async fn post(
        &self,
        model: &str,
        body: &GenerateContentRequest,
        credential: &Credential,
    ) -> TTSResult<GenerateContentResponse> {
        let response = self
            .http_client
            .post(self.config.endpoint(model))
            .header(API_KEY_HEADER, credential.expose())
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = map_status_error(status, &body);
            warn!(status = status.as_u16(), model, error = %err, "Gemini request failed");
            return Err(err);
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TTSError::Network(format!("Timed out reading response: {e}"))
                } else {
                    TTSError::Api(format!("Failed to parse response: {e}"))
                }
            })
    }
}

#[async_trait]
impl SpeechProvider for GeminiTTS {
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        credential: &Credential,
    ) -> TTSResult<SynthesisResult> {
        let speakers = match &request.voice_config {
            VoiceConfig::Single(_) => 1,
            VoiceConfig::MultiSpeaker(assignments) => assignments.len(),
        };
        debug!(
            model = %request.model,
            speakers,
            text_len = request.text.len(),
            "Gemini TTS synthesis request"
        );

        let body = GenerateContentRequest::speech(request);
        let response = self.post(request.model.as_str(), &body, credential).await?;

        let inline = response
            .audio_payload()
            .ok_or_else(|| TTSError::Api("no audio data in response".to_string()))?;
        let encoded = inline
            .data
            .as_deref()
            .ok_or_else(|| TTSError::Api("no audio data in response".to_string()))?;
        if encoded.is_empty() {
            return Err(TTSError::Api("empty audio data in response".to_string()));
        }

        let pcm = BASE64
            .decode(encoded)
            .map_err(|e| TTSError::Api(format!("Base64 decode error: {e}")))?;
        if pcm.is_empty() {
            return Err(TTSError::Api("empty audio data in response".to_string()));
        }

        let result = SynthesisResult::from_pcm(pcm)?;
        info!(
            audio_bytes = result.data.len(),
            duration_ms = result.duration_ms(),
            mime_type = inline.mime_type.as_deref().unwrap_or("unknown"),
            "Gemini TTS synthesis complete"
        );
        Ok(result)
    }

    async fn generate_text(&self, prompt: &str, credential: &Credential) -> TTSResult<String> {
        let model = self.config.generation_model.as_str();
        debug!(model, prompt_len = prompt.len(), "Gemini text generation request");

        let body = GenerateContentRequest::text(prompt);
        let response = self.post(model, &body, credential).await?;

        response
            .text()
            .ok_or_else(|| TTSError::Api("no text in response".to_string()))
    }

    fn get_provider_info(&self) -> serde_json::Value {
        serde_json::json!({
            "provider": "gemini",
            "api_type": "HTTP REST",
            "output_format": "wav",
            "sample_rate": crate::core::tts::SAMPLE_RATE,
            "supported_models": GeminiTTSModel::all()
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>(),
            "supported_voices": GeminiVoice::all()
                .iter()
                .map(|v| v.as_str())
                .collect::<Vec<_>>(),
            "multi_speaker_count": MULTI_SPEAKER_COUNT,
            "generation_model": self.config.generation_model,
            "endpoint": self.config.base_url,
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> TTSError {
    if e.is_timeout() {
        TTSError::Network(format!("Request timed out: {e}"))
    } else if e.is_connect() {
        TTSError::Network(format!("Connection failed: {e}"))
    } else {
        TTSError::Network(format!("Request failed: {e}"))
    }
}

/// Map a non-2xx response to an error, preferring the remote `error.message`.
fn map_status_error(status: StatusCode, body: &str) -> TTSError {
    let parsed = serde_json::from_str::<ApiErrorResponse>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|p| p.error.message.clone())
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                trimmed.to_string()
            }
        });

    let invalid_key = status == StatusCode::BAD_REQUEST && {
        let lower = message.to_lowercase();
        lower.contains("api key") || lower.contains("api_key_invalid")
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TTSError::Auth(message),
        _ if invalid_key => TTSError::Auth(message),
        _ => TTSError::Api(format!("HTTP {}: {message}", status.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_auth() {
        let err = map_status_error(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, TTSError::Auth(_)));

        let err = map_status_error(
            StatusCode::FORBIDDEN,
            r#"{"error":{"code":403,"message":"Permission denied","status":"PERMISSION_DENIED"}}"#,
        );
        assert_eq!(err, TTSError::Auth("Permission denied".to_string()));

        let err = map_status_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#,
        );
        assert!(matches!(err, TTSError::Auth(_)));
    }

    #[test]
    fn test_status_mapping_api() {
        let err = map_status_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"code":400,"message":"Unsupported voice","status":"INVALID_ARGUMENT"}}"#,
        );
        assert_eq!(err, TTSError::Api("HTTP 400: Unsupported voice".to_string()));

        let err = map_status_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(
            err,
            TTSError::Api("HTTP 500: Internal Server Error".to_string())
        );

        let err = map_status_error(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert_eq!(err, TTSError::Api("HTTP 429: slow down".to_string()));
    }

    #[test]
    fn test_provider_info() {
        let tts = GeminiTTS::new(GeminiTTSConfig::default()).unwrap();
        let info = tts.get_provider_info();

        assert_eq!(info["provider"], "gemini");
        assert_eq!(info["sample_rate"], 24000);
        assert_eq!(info["multi_speaker_count"], 2);
        assert!(
            info["supported_models"]
                .as_array()
                .unwrap()
                .contains(&serde_json::json!("gemini-2.5-flash-preview-tts"))
        );
        assert_eq!(info["supported_voices"].as_array().unwrap().len(), 30);
    }
}
