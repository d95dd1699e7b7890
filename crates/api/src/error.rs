use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use drillcheck_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `drillcheck_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body was not valid JSON or did not match the expected shape.
    #[error(transparent)]
    Body(#[from] JsonRejection),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Config(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INVALID_CONFIG",
                    msg.clone(),
                ),
                CoreError::Parse(err) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "MALFORMED_JSON",
                    err.to_string(),
                ),
            },

            // --- HTTP-specific errors ---
            AppError::Body(rejection) => (rejection.status(), "INVALID_BODY", rejection.body_text()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
