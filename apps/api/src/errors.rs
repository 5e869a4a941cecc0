use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    #[error("Malformed AI response: {0}")]
    MalformedAiResponse(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Upstream timeout")]
    UpstreamTimeout,

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::UnreadableDocument(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNREADABLE_DOCUMENT",
                msg.clone(),
            ),
            AppError::MalformedAiResponse(msg) => {
                tracing::error!("Malformed AI response: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_AI_RESPONSE",
                    format!("AI response did not match the expected schema: {msg}"),
                )
            }
            AppError::RateLimited(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", msg.clone())
            }
            AppError::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "UPSTREAM_TIMEOUT",
                "AI service did not respond within the configured timeout".to_string(),
            ),
            AppError::Upstream(msg) => {
                tracing::error!("Upstream AI error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The AI service returned an error".to_string(),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
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

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::BudgetExhausted { limit } => AppError::RateLimited(format!(
                "AI request budget exhausted ({limit} requests per minute); retry shortly"
            )),
            LlmError::RateLimited { retries } => AppError::RateLimited(format!(
                "AI service rate limited after {retries} retries; retry later"
            )),
            LlmError::Timeout => AppError::UpstreamTimeout,
            LlmError::EmptyContent => {
                AppError::MalformedAiResponse("AI service returned empty content".to_string())
            }
            LlmError::Http(e) if e.is_timeout() => AppError::UpstreamTimeout,
            LlmError::Http(e) => AppError::Upstream(e.to_string()),
            LlmError::Api { status, message } => {
                AppError::Upstream(format!("status {status}: {message}"))
            }
        }
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::NotPdf => {
                AppError::Validation("file is not a valid PDF document".to_string())
            }
            ExtractionError::Unreadable(msg) => AppError::UnreadableDocument(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                AppError::PayloadTooLarge("too big".into()),
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                AppError::UnreadableDocument("no text".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::MalformedAiResponse("bad json".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::RateLimited("slow down".into()),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (AppError::UpstreamTimeout, StatusCode::GATEWAY_TIMEOUT),
            (
                AppError::NotFound("missing".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Validation("bad input".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_llm_timeout_maps_to_upstream_timeout() {
        let err: AppError = LlmError::Timeout.into();
        assert!(matches!(err, AppError::UpstreamTimeout));
    }

    #[test]
    fn test_budget_exhausted_maps_to_rate_limited() {
        let err: AppError = LlmError::BudgetExhausted { limit: 30 }.into();
        assert!(matches!(err, AppError::RateLimited(_)));
    }

    #[test]
    fn test_not_pdf_maps_to_validation() {
        let err: AppError = ExtractionError::NotPdf.into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
