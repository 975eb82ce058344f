use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

/// Custom error type for the application.
/// Upstream rate-limit and quota signals keep their own variants so the
/// caller can tell them apart from a generic gateway failure.
#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    RateLimited(String),
    QuotaExceeded(String),
    UpstreamError(String),
    InternalServerError(String),
}

/// Error response structure relayed to the page
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::RateLimited(msg) => {
                warn!("Upstream rate limit hit");
                (StatusCode::TOO_MANY_REQUESTS, msg)
            }
            AppError::QuotaExceeded(msg) => {
                warn!("Upstream quota exceeded");
                (StatusCode::PAYMENT_REQUIRED, msg)
            }
            AppError::UpstreamError(msg) => {
                error!("AI gateway error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::InternalServerError(msg) => {
                error!("Internal server error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse { error: message });

        (status, body).into_response()
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::InternalServerError(msg.to_string())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::InternalServerError(msg)
    }
}

/// Result type for application handlers
pub type AppResult<T> = Result<T, AppError>;
