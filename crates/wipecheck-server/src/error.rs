use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use wipecheck::GateError;

/// HTTP-facing error type. Payment-required is not here: unpaid checks get
/// a 402 with a challenge body from the route handlers, not an error path.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<GateError> for ApiError {
    fn from(e: GateError) -> Self {
        match e {
            GateError::InvalidRequest(msg) => ApiError::InvalidRequest(msg),
            GateError::NotFound(id) => ApiError::NotFound(id),
            GateError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::InvalidRequest(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "invalid_request",
                "message": msg,
            })),
            ApiError::NotFound(id) => HttpResponse::NotFound().json(serde_json::json!({
                "error": "not_found",
                "message": format!("Check '{id}' not found"),
            })),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred",
                }))
            }
        }
    }
}
