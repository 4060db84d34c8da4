use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::error::Elapsed;

use crate::state::AppState;

/// Upper bound on each connectivity probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency is reachable, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// `healthy` or `unhealthy`.
    pub database: &'static str,
    /// `healthy` or `unhealthy`.
    pub bot: &'static str,
    pub timestamp: DateTime<Utc>,
}

fn label(healthy: bool) -> &'static str {
    if healthy {
        "healthy"
    } else {
        "unhealthy"
    }
}

/// Log a failed or timed-out probe; return whether it succeeded.
fn probe_succeeded<E: std::fmt::Display>(
    dependency: &'static str,
    result: Result<Result<(), E>, Elapsed>,
) -> bool {
    match result {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::error!(dependency, error = %e, "Health check failed");
            false
        }
        Err(_) => {
            tracing::error!(dependency, "Health check timed out");
            false
        }
    }
}

/// GET / -- bare liveness probe.
async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health -- returns store and Telegram connectivity.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db, bot) = tokio::join!(
        tokio::time::timeout(PROBE_TIMEOUT, state.dispatcher.store().ping()),
        tokio::time::timeout(PROBE_TIMEOUT, state.dispatcher.messenger().ping()),
    );

    let db_healthy = probe_succeeded("database", db);
    let bot_healthy = probe_succeeded("telegram", bot);

    Json(HealthResponse {
        status: if db_healthy && bot_healthy {
            "ok"
        } else {
            "degraded"
        },
        version: env!("CARGO_PKG_VERSION"),
        database: label(db_healthy),
        bot: label(bot_healthy),
        timestamp: Utc::now(),
    })
}

/// Mount health check routes at the root level.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
}
