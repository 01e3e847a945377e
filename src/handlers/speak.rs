use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::audio::encode_wav;
use crate::core::credential::Credential;
use crate::core::tts::{SynthesisRequest, SynthesisResult};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// Request body for single-voice synthesis
#[derive(Debug, Deserialize)]
pub struct SingleSpeakerRequest {
    /// Caller's Gemini key; required on every request
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
    /// Delivery hint, e.g. "Say cheerfully"
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Request body for two-speaker synthesis
#[derive(Debug, Deserialize)]
pub struct MultiSpeakerRequest {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub text: String,
    /// Speaker label to voice name
    #[serde(default)]
    pub speakers: BTreeMap<String, String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Successful synthesis response
#[derive(Debug, Serialize)]
pub struct AudioResponse {
    pub success: bool,
    /// Base64-encoded WAV file
    pub audio_data: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_text: Option<String>,
}

impl AudioResponse {
    pub(crate) fn new(
        audio: &SynthesisResult,
        message: String,
        generated_text: Option<String>,
    ) -> AppResult<Self> {
        let wav = encode_wav(audio)?;
        Ok(Self {
            success: true,
            audio_data: BASE64.encode(wav),
            message,
            generated_text,
        })
    }
}

/// Unwrap a JSON body, reporting malformed input in the API's error shape.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Credential from the request body.
///
/// The server never lends its own configured key to web callers.
pub(crate) fn request_credential(api_key: Option<&str>) -> AppResult<Credential> {
    Ok(Credential::new(api_key.unwrap_or_default())?)
}

/// Requested model, or the configured one when absent or blank.
pub(crate) fn requested_model<'a>(state: &'a AppState, model: Option<&'a str>) -> &'a str {
    model
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(state.config.tts_model.as_str())
}

/// Synthesize text with one voice
pub async fn single_speaker(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SingleSpeakerRequest>, JsonRejection>,
) -> AppResult<Json<AudioResponse>> {
    let body = json_body(payload)?;
    let credential = request_credential(body.api_key.as_deref())?;

    let voice = body
        .voice
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(state.config.default_voice.as_str());
    let model = requested_model(&state, body.model.as_deref());

    let request = SynthesisRequest::build(&body.text, Some(model), voice, body.style.as_deref())?;
    info!(voice, model = %request.model, "Single-speaker synthesis");

    let audio = state.provider.synthesize(&request, &credential).await?;
    let response = AudioResponse::new(&audio, format!("Generated with voice: {voice}"), None)?;
    Ok(Json(response))
}

/// Synthesize a two-speaker dialogue
pub async fn multi_speaker(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MultiSpeakerRequest>, JsonRejection>,
) -> AppResult<Json<AudioResponse>> {
    let body = json_body(payload)?;
    let credential = request_credential(body.api_key.as_deref())?;

    let speakers: Vec<(&str, &str)> = body
        .speakers
        .iter()
        .map(|(label, voice)| (label.as_str(), voice.as_str()))
        .collect();
    let model = requested_model(&state, body.model.as_deref());

    let request = SynthesisRequest::build_multi_speaker(&body.text, &speakers, Some(model))?;
    info!(speakers = speakers.len(), model = %request.model, "Multi-speaker synthesis");

    let audio = state.provider.synthesize(&request, &credential).await?;
    let response = AudioResponse::new(
        &audio,
        format!("Generated with {} speakers", speakers.len()),
        None,
    )?;
    Ok(Json(response))
}
