use std::sync::Arc;

use tokio_util::task::TaskTracker;

use crate::bot::Dispatcher;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Update router holding the character store and the messenger.
    pub dispatcher: Arc<Dispatcher>,
    /// Tracks per-update tasks so shutdown can wait for them.
    pub tasks: TaskTracker,
    /// Expected `X-Telegram-Bot-Api-Secret-Token` for webhook deliveries.
    pub webhook_secret: Option<Arc<str>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
