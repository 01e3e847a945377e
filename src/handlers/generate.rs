use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::speak::{AudioResponse, json_body, request_credential};
use crate::core::content::{VoiceSelection, generate_content, generate_speech};
use crate::errors::AppResult;
use crate::state::AppState;

/// Request body for topic generation
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub topic: String,
    /// Speaker label to voice name; absent for a single narrator
    #[serde(default)]
    pub speakers: Option<BTreeMap<String, String>>,
    /// Narrator voice when no speakers are given
    #[serde(default)]
    pub voice: Option<String>,
    /// Return the text without synthesizing it
    #[serde(default)]
    pub generate_only: bool,
}

impl GenerateRequest {
    fn voice_selection(&self, state: &AppState) -> VoiceSelection {
        match self.speakers.as_ref().filter(|s| !s.is_empty()) {
            Some(speakers) => VoiceSelection::Dialogue(
                speakers
                    .iter()
                    .map(|(label, voice)| (label.clone(), voice.clone()))
                    .collect(),
            ),
            None => VoiceSelection::Single(
                self.voice
                    .clone()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| state.config.default_voice.as_str().to_string()),
            ),
        }
    }
}

/// Generate content about a topic and optionally speak it
pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Response> {
    let body = json_body(payload)?;
    let credential = request_credential(body.api_key.as_deref())?;
    let voices = body.voice_selection(&state);

    if body.generate_only {
        let labels = voices.speaker_labels();
        let text =
            generate_content(state.provider.as_ref(), &body.topic, labels.as_deref(), &credential)
                .await?;
        info!(chars = text.len(), "Generated content only");
        return Ok(Json(json!({
            "success": true,
            "message": "Content generated successfully",
            "generated_text": text,
        }))
        .into_response());
    }

    let model = state.config.tts_model.as_str();
    let generated = generate_speech(
        state.provider.as_ref(),
        &body.topic,
        &voices,
        Some(model),
        &credential,
    )
    .await?;

    let response = AudioResponse::new(
        &generated.audio,
        format!("Generated content about: {}", body.topic.trim()),
        Some(generated.text),
    )?;
    Ok(Json(response).into_response())
}
