//! Minimal Telegram Bot API client.
//!
//! Covers only what the character bot uses: long polling, sending replies,
//! registering commands and managing the webhook. Wire types live in
//! [`types`], the HTTP client in [`api`], and the [`Messenger`] seam the bot
//! runtime sends through in [`messenger`].

pub mod api;
pub mod messenger;
pub mod types;

pub use api::{TelegramApi, TelegramError};
pub use messenger::Messenger;
