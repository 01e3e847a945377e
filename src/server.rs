//! HTTP server assembly: routes plus CORS and security headers.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::anyhow;
use axum::Router;
use http::{Method, header::CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Build the CORS layer for the configured origins
///
/// `None` keeps the default same-origin policy; the bundled page is served by
/// this server, so it needs no CORS at all.
pub fn cors_layer(origins: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(false);

    match origins.map(str::trim) {
        Some("*") => base.allow_origin(Any),
        Some(list) => {
            let origins: Vec<http::HeaderValue> = list
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            base.allow_origin(origins)
        }
        None => {
            info!(
                "CORS not configured, defaulting to same-origin only. \
                 Set CORS_ALLOWED_ORIGINS to enable cross-origin access."
            );
            base
        }
    }
}

/// Full application with middleware layers applied
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.cors_allowed_origins.as_deref());

    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_CONTENT_TYPE_OPTIONS,
            http::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_FRAME_OPTIONS,
            http::HeaderValue::from_static("DENY"),
        ));

    routes::create_app(state)
        .layer(cors)
        .layer(security_headers)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let address = config.address();
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    info!("Web clients send their own API key with each request");

    let app_state = AppState::new(config)?;
    let app = build_router(app_state);

    let listener = TcpListener::bind(&socket_addr).await?;
    println!("Server listening on http://{socket_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
