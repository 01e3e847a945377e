use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::core::tts::TTSError;

/// Application error type
///
/// Every variant renders as `{"success": false, "error": "..."}`.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    /// The upstream speech service failed or answered with an unusable payload
    BadGateway(String),
    /// The upstream speech service could not be reached
    ServiceUnavailable(String),
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                msg
            }
            AppError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                msg
            }
            AppError::BadGateway(msg) => {
                tracing::warn!("Upstream error: {}", msg);
                msg
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Upstream unreachable: {}", msg);
                msg
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            AppError::BadGateway(msg) => write!(f, "Bad gateway: {msg}"),
            AppError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {msg}"),
            AppError::InternalServerError(msg) => write!(f, "Internal server error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<TTSError> for AppError {
    fn from(err: TTSError) -> Self {
        let message = err.to_string();
        match err {
            TTSError::Validation(_) => AppError::BadRequest(message),
            TTSError::Auth(_) => AppError::Unauthorized(message),
            TTSError::Api(_) => AppError::BadGateway(message),
            TTSError::Network(_) => AppError::ServiceUnavailable(message),
            TTSError::Io { .. } => AppError::InternalServerError(message),
        }
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
