use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::calendar::CalendarError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The variants are the caller-facing taxonomy: a client can branch on the
/// `code` field of the response body instead of inspecting message strings.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field, file, or parameter is missing or malformed.
    #[error("Input error: {0}")]
    Input(String),

    /// No parseable structured data could be recovered: an unreadable
    /// document, or an LLM reply with no embedded JSON object.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// A network or API failure talking to the LLM, the calendar service,
    /// or a remote page.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Missing credentials or configuration for an external collaborator.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Input(msg) => (StatusCode::BAD_REQUEST, "INPUT_ERROR", msg.clone()),
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg.clone())
            }
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR", msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// LLM transport failures are upstream problems; a reply we could not pull
/// a JSON object out of is an extraction problem.
impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::NoJson | LlmError::Parse(_) | LlmError::EmptyContent => {
                AppError::Extraction(err.to_string())
            }
            LlmError::Http(_) | LlmError::Api { .. } | LlmError::RateLimited { .. } => {
                AppError::Upstream(err.to_string())
            }
        }
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidDate(_) => AppError::Input(err.to_string()),
            CalendarError::Config(_) => AppError::Config(err.to_string()),
            CalendarError::Http(_) | CalendarError::Api { .. } => {
                AppError::Upstream(err.to_string())
            }
        }
    }
}
