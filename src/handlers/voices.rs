use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;

use crate::core::tts::{GeminiTTSModel, GeminiVoice};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct Voice {
    /// Voice name as accepted by the TTS routes
    pub name: String,
    /// Descriptive tone family
    pub tone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoicesResponse {
    pub success: bool,
    pub voices: Vec<Voice>,
    pub models: Vec<String>,
    pub default_voice: String,
    pub default_model: String,
}

/// List the voice catalog and supported models
pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<VoicesResponse> {
    let voices = GeminiVoice::all()
        .iter()
        .map(|v| Voice {
            name: v.as_str().to_string(),
            tone: v.tone().to_string(),
        })
        .collect();

    Json(VoicesResponse {
        success: true,
        voices,
        models: GeminiTTSModel::all()
            .iter()
            .map(|m| m.as_str().to_string())
            .collect(),
        default_voice: state.config.default_voice.as_str().to_string(),
        default_model: state.config.tts_model.as_str().to_string(),
    })
}
