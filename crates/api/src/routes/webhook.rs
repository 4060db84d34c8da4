use axum::routing::post;
use axum::Router;

use crate::handlers::webhook;
use crate::state::AppState;

/// Routes mounted at `/telegram`.
///
/// ```text
/// POST   /webhook    -> receive
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/webhook", post(webhook::receive))
}
