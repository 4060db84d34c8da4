//! HTTP client for the Telegram Bot API.
//!
//! Wraps the handful of Bot API methods the bot calls using [`reqwest`].
//! Every method is a `POST {api_url}/bot{token}/{method}` with a JSON body.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{ApiResponse, BotCommand, OutgoingReply, Update, User};

/// Extra time allowed on top of the long-poll timeout before reqwest gives up.
const LONG_POLL_GRACE: Duration = Duration::from_secs(10);

/// Timeout for ordinary (non-polling) requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors from the Bot API layer.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A 2xx response whose body was not a Bot API envelope.
    #[error("Malformed Telegram response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Telegram answered with `ok: false`, or a non-2xx status without an
    /// envelope (e.g. a proxy error page).
    #[error("Telegram API error ({code}): {description}")]
    Api {
        /// `error_code` from the response, or the HTTP status if absent.
        code: i32,
        description: String,
    },
}

/// Bot API client bound to one bot token.
pub struct TelegramApi {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl TelegramApi {
    /// Create a client.
    ///
    /// * `api_url` - Base URL without trailing slash, e.g.
    ///   `https://api.telegram.org`.
    /// * `token` - Bot token issued by BotFather.
    pub fn new(api_url: String, token: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, token)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String, token: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// `getMe`: identity of the bot; doubles as a connectivity probe.
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({}), REQUEST_TIMEOUT)
            .await
    }

    /// `getUpdates`: long-poll for new message updates after `offset`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let body = serde_json::json!({
            "offset": offset,
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        self.call(
            "getUpdates",
            &body,
            Duration::from_secs(timeout_secs) + LONG_POLL_GRACE,
        )
        .await
    }

    /// `sendMessage` as a reply to the message the reply targets.
    pub async fn send_reply(&self, reply: &OutgoingReply) -> Result<(), TelegramError> {
        let body = serde_json::json!({
            "chat_id": reply.chat_id,
            "text": reply.text,
            "parse_mode": reply.parse_mode,
            "reply_parameters": {
                "message_id": reply.reply_to_message_id,
                "allow_sending_without_reply": true,
            },
        });
        let _: serde_json::Value = self.call("sendMessage", &body, REQUEST_TIMEOUT).await?;
        Ok(())
    }

    /// `setMyCommands`: publish the command menu shown in clients.
    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<(), TelegramError> {
        let body = serde_json::json!({ "commands": commands });
        let _: bool = self.call("setMyCommands", &body, REQUEST_TIMEOUT).await?;
        Ok(())
    }

    /// `setWebhook`: deliver updates to `url`, optionally signed with
    /// `secret_token`.
    pub async fn set_webhook(
        &self,
        url: &str,
        secret_token: Option<&str>,
    ) -> Result<(), TelegramError> {
        let body = serde_json::json!({
            "url": url,
            "secret_token": secret_token,
            "allowed_updates": ["message"],
        });
        let _: bool = self.call("setWebhook", &body, REQUEST_TIMEOUT).await?;
        Ok(())
    }

    /// `deleteWebhook`: required before `getUpdates` works on a bot that
    /// previously had a webhook.
    pub async fn delete_webhook(&self) -> Result<(), TelegramError> {
        let _: bool = self
            .call("deleteWebhook", &serde_json::json!({}), REQUEST_TIMEOUT)
            .await?;
        Ok(())
    }

    // ---- private helpers ----

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// POST a method call and unwrap the `{ok, result}` envelope.
    ///
    /// Telegram reports most failures with a non-2xx status *and* a JSON
    /// envelope, so the body is decoded before the status is considered.
    /// Request errors are stripped of their URL, which embeds the token.
    /// The HTTP status stands in for a missing `error_code`.
    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T, TelegramError> {
        let response = self
            .client
            .post(self.method_url(method))
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        let code = i32::from(status.as_u16());
        let body = response
            .bytes()
            .await
            .map_err(reqwest::Error::without_url)?;

        let envelope: ApiResponse<T> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(TelegramError::Api {
                    code,
                    description: status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        match envelope {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            other => Err(TelegramError::Api {
                code: other.error_code.unwrap_or(code),
                description: other
                    .description
                    .unwrap_or_else(|| "missing result".to_string()),
            }),
        }
    }
}
