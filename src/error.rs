use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors surfaced to API callers as structured `{error, code}` JSON bodies.
///
/// Internal detail never crosses this boundary; anything unexpected collapses
/// into the generic `Server` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    MissingApiKey,
    InvalidApiKey,
    InvalidDate,
    InvalidPagination,
    Server,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            ApiError::MissingApiKey => (
                StatusCode::UNAUTHORIZED,
                "API key is required",
                "MISSING_API_KEY",
            ),
            ApiError::InvalidApiKey => {
                (StatusCode::UNAUTHORIZED, "Invalid API key", "INVALID_API_KEY")
            }
            ApiError::InvalidDate => (
                StatusCode::BAD_REQUEST,
                "Invalid date format. Use YYYY-MM-DD",
                "INVALID_DATE",
            ),
            ApiError::InvalidPagination => (
                StatusCode::BAD_REQUEST,
                "Page and limit must be positive integers",
                "INVALID_PAGINATION",
            ),
            ApiError::Server => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "SERVER_ERROR",
            ),
        };

        let body = Json(json!({ "error": message, "code": code }));
        (status, body).into_response()
    }
}
