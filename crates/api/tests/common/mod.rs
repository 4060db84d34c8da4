#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use charbot_core::admin::AdminAllowList;
use charbot_core::character::CharacterRecord;
use charbot_core::store::{CharacterStore, StoreError, Upserted};
use charbot_core::types::CharId;
use charbot_telegram::types::{Chat, ChatKind, Message, OutgoingReply, PhotoSize, Update, User};
use charbot_telegram::{Messenger, TelegramError};
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tokio_util::task::TaskTracker;
use tower::ServiceExt;

use charbot_api::bot::Dispatcher;
use charbot_api::config::ServerConfig;
use charbot_api::router::build_app_router;
use charbot_api::state::AppState;

pub const ADMIN_ID: i64 = 1001;
pub const USER_ID: i64 = 2002;
pub const BOT_USERNAME: &str = "CharBot";

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Messenger that records every reply instead of calling Telegram.
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<OutgoingReply>>,
    unreachable: bool,
}

impl RecordingMessenger {
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    pub async fn sent(&self) -> Vec<OutgoingReply> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, reply: &OutgoingReply) -> Result<(), TelegramError> {
        self.sent.lock().await.push(reply.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), TelegramError> {
        if self.unreachable {
            return Err(TelegramError::Api {
                code: 502,
                description: "Bad Gateway".to_string(),
            });
        }
        Ok(())
    }
}

/// Store whose every operation fails, for persistence-failure paths.
pub struct FailingStore;

fn backend_down() -> StoreError {
    StoreError::Backend("connection refused".to_string())
}

#[async_trait]
impl CharacterStore for FailingStore {
    async fn find_by_char_id(&self, _: CharId) -> Result<Option<CharacterRecord>, StoreError> {
        Err(backend_down())
    }

    async fn find_by_photo_ref(&self, _: &str) -> Result<Option<CharacterRecord>, StoreError> {
        Err(backend_down())
    }

    async fn insert(&self, _: &CharacterRecord) -> Result<CharacterRecord, StoreError> {
        Err(backend_down())
    }

    async fn update_by_char_id(
        &self,
        _: CharId,
        _: &str,
        _: &str,
    ) -> Result<Option<CharacterRecord>, StoreError> {
        Err(backend_down())
    }

    async fn upsert_by_char_id(&self, _: &CharacterRecord) -> Result<Upserted, StoreError> {
        Err(backend_down())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(backend_down())
    }
}

// ---------------------------------------------------------------------------
// Update builders
// ---------------------------------------------------------------------------

/// Three sizes of one photo; the largest carries `unique_id`.
pub fn photo(unique_id: &str) -> Vec<PhotoSize> {
    [("thumb", 90), ("medium", 320), (unique_id, 1280)]
        .into_iter()
        .map(|(id, side)| PhotoSize {
            file_id: format!("file-{id}"),
            file_unique_id: if side == 1280 {
                unique_id.to_string()
            } else {
                format!("{unique_id}-{id}")
            },
            width: side,
            height: side,
            file_size: None,
        })
        .collect()
}

pub fn message(chat_kind: ChatKind, sender_id: i64) -> Message {
    Message {
        message_id: 500,
        from: Some(User {
            id: sender_id,
            is_bot: false,
            first_name: "Tester".to_string(),
            username: None,
        }),
        chat: Chat {
            id: match chat_kind {
                ChatKind::Private => sender_id,
                _ => -100,
            },
            kind: chat_kind,
        },
        text: None,
        caption: None,
        photo: None,
        reply_to_message: None,
    }
}

/// A captioned photo sent in a private chat.
pub fn captioned_photo(caption: &str, unique_id: &str) -> Message {
    Message {
        caption: Some(caption.to_string()),
        photo: Some(photo(unique_id)),
        ..message(ChatKind::Private, USER_ID)
    }
}

/// A text command, optionally replying to a photo with `unique_id`.
pub fn command(text: &str, sender_id: i64, reply_to_photo: Option<&str>) -> Message {
    let reply_to_message = reply_to_photo.map(|id| {
        Box::new(Message {
            message_id: 400,
            photo: Some(photo(id)),
            ..message(ChatKind::Private, 999)
        })
    });
    Message {
        text: Some(text.to_string()),
        reply_to_message,
        ..message(ChatKind::Private, sender_id)
    }
}

pub fn update(message: Message) -> Update {
    Update {
        update_id: 1,
        message: Some(message),
    }
}

pub fn caption(name: &str, char_id: i64) -> String {
    format!("✨ Look who appeared!\n\n👤 ɴᴀᴍᴇ: {name}\n🆔 ɪᴅ: {char_id}\n⭐ ʀᴀʀɪᴛʏ: Rare")
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
    }
}

pub fn dispatcher(
    store: Arc<dyn CharacterStore>,
    messenger: Arc<RecordingMessenger>,
) -> Dispatcher {
    Dispatcher::new(
        store,
        messenger,
        AdminAllowList::new([ADMIN_ID]),
        Some(BOT_USERNAME.to_string()),
    )
}

pub fn test_state(
    store: Arc<dyn CharacterStore>,
    messenger: Arc<RecordingMessenger>,
    webhook_secret: Option<&str>,
) -> AppState {
    AppState {
        dispatcher: Arc::new(dispatcher(store, messenger)),
        tasks: TaskTracker::new(),
        webhook_secret: webhook_secret.map(Arc::from),
        config: Arc::new(test_config()),
    }
}

/// Build the full application router with all middleware layers, exactly as
/// `main.rs` does.
pub fn build_test_app(state: AppState, webhook: bool) -> Router {
    build_app_router(state, webhook)
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
    headers: &[(&str, &str)],
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
