//! Outbound seam used by the bot runtime.

use async_trait::async_trait;

use crate::api::{TelegramApi, TelegramError};
use crate::types::OutgoingReply;

/// Something that can deliver replies and report transport health.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, reply: &OutgoingReply) -> Result<(), TelegramError>;

    async fn ping(&self) -> Result<(), TelegramError>;
}

#[async_trait]
impl Messenger for TelegramApi {
    async fn send(&self, reply: &OutgoingReply) -> Result<(), TelegramError> {
        self.send_reply(reply).await
    }

    async fn ping(&self) -> Result<(), TelegramError> {
        self.get_me().await.map(|_| ())
    }
}
