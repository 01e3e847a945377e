use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Json},
};
use serde_json::{Value, json};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Serve the embedded single-page UI
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check handler
///
/// Reports whether the server has a key configured, never the key itself.
/// Web requests are not served with it; each one carries its own key.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Gemini TTS API is running",
        "api_key_set": state.config.has_api_key(),
    }))
}
