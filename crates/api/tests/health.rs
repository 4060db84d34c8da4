//! Integration tests for the health endpoints and general HTTP behaviour.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use charbot_core::memory::MemoryCharacterStore;
use charbot_db::PgCharacterStore;
use common::{body_json, build_test_app, get, test_state, FailingStore, RecordingMessenger};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: GET /health against a real database reports everything healthy
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let state = test_state(
        Arc::new(PgCharacterStore::new(pool)),
        Arc::new(RecordingMessenger::default()),
        None,
    );
    let response = get(build_test_app(state, false), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "healthy");
    assert_eq!(json["bot"], "healthy");
    assert!(json["version"].is_string());
    assert!(json["timestamp"].is_string());
}

// ---------------------------------------------------------------------------
// Test: unreachable dependencies degrade the report but still return 200
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_reports_unhealthy_database() {
    let state = test_state(
        Arc::new(FailingStore),
        Arc::new(RecordingMessenger::default()),
        None,
    );
    let response = get(build_test_app(state, false), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"], "unhealthy");
    assert_eq!(json["bot"], "healthy");
}

#[tokio::test]
async fn health_check_reports_unhealthy_bot() {
    let state = test_state(
        Arc::new(MemoryCharacterStore::new()),
        Arc::new(RecordingMessenger::unreachable()),
        None,
    );
    let json = body_json(get(build_test_app(state, false), "/health").await).await;

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"], "healthy");
    assert_eq!(json["bot"], "unhealthy");
}

// ---------------------------------------------------------------------------
// Test: GET / is a bare liveness probe
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_returns_ok() {
    let state = test_state(
        Arc::new(FailingStore),
        Arc::new(RecordingMessenger::unreachable()),
        None,
    );
    let response = get(build_test_app(state, false), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: unknown route returns 404 and every response carries a request id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let state = test_state(
        Arc::new(MemoryCharacterStore::new()),
        Arc::new(RecordingMessenger::default()),
        None,
    );
    let response = get(build_test_app(state, false), "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let state = test_state(
        Arc::new(MemoryCharacterStore::new()),
        Arc::new(RecordingMessenger::default()),
        None,
    );
    let response = get(build_test_app(state, false), "/health").await;

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}
