use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors returned by HTTP handlers, rendered as `{"error", "code"}` JSON.
///
/// Bot-side failures never reach this type; they are answered in chat.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The caller failed to prove it is Telegram.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The body is not a Telegram update.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
