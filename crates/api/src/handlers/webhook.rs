//! Handler for Telegram webhook deliveries.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use charbot_telegram::types::Update;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Header Telegram sets to the `secret_token` given to `setWebhook`.
pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// POST /telegram/webhook
///
/// Acknowledges immediately and handles the update on a tracked task, so a
/// slow database never makes Telegram retry the delivery. The secret is
/// checked before the body is decoded.
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<StatusCode> {
    if let Some(expected) = state.webhook_secret.as_deref() {
        let provided = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
        if provided != Some(expected) {
            tracing::warn!("Webhook secret mismatch");
            return Err(AppError::Unauthorized(
                "Invalid webhook secret token".to_string(),
            ));
        }
    }

    let update: Update = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Undecodable webhook update");
        AppError::BadRequest(format!("Invalid update: {e}"))
    })?;

    let dispatcher = Arc::clone(&state.dispatcher);
    state
        .tasks
        .spawn(async move { dispatcher.handle(update).await });
    Ok(StatusCode::OK)
}
