use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, generate, speak, voices};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router, mounted under `/api`
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(api::health_check))
        .route("/voices", get(voices::list_voices))
        .route("/tts/single", post(speak::single_speaker))
        .route("/tts/multi", post(speak::multi_speaker))
        .route("/generate", post(generate::generate))
        .layer(TraceLayer::new_for_http())
}

/// Full application router: the embedded page plus the JSON API
///
/// CORS and security headers are layered on in `server::build_router`.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::index))
        .nest("/api", create_api_router())
        .with_state(state)
}
