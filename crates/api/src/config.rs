use charbot_core::admin::AdminAllowList;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for in-flight updates, in seconds (default: `10`).
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default   |
    /// |-------------------------|-----------|
    /// | `HOST`                  | `0.0.0.0` |
    /// | `PORT`                  | `8000`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`      |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `10`      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            request_timeout_secs,
            shutdown_timeout_secs,
        }
    }
}

/// How the bot receives updates from Telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotMode {
    /// Long-poll `getUpdates` from a background task.
    Polling,
    /// Telegram pushes updates to `POST /telegram/webhook`.
    Webhook,
}

impl BotMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "polling" => Some(Self::Polling),
            "webhook" => Some(Self::Webhook),
            _ => None,
        }
    }
}

/// Telegram bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub api_url: String,
    pub admins: AdminAllowList,
    pub mode: BotMode,
    /// Public URL registered with `setWebhook`; required in webhook mode.
    pub webhook_url: Option<String>,
    /// Expected `X-Telegram-Bot-Api-Secret-Token` header value, if any.
    pub webhook_secret: Option<String>,
    pub poll_timeout_secs: u64,
}

impl BotConfig {
    /// Load bot configuration from environment variables.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `TELEGRAM_BOT_TOKEN`      | required                   |
    /// | `TELEGRAM_API_URL`        | `https://api.telegram.org` |
    /// | `ADMIN_IDS`               | empty                      |
    /// | `BOT_MODE`                | `polling`                  |
    /// | `TELEGRAM_WEBHOOK_URL`    | required for `webhook`     |
    /// | `TELEGRAM_WEBHOOK_SECRET` | unset                      |
    /// | `POLL_TIMEOUT_SECS`       | `30`                       |
    pub fn from_env() -> Self {
        let token = std::env::var("TELEGRAM_BOT_TOKEN").expect("TELEGRAM_BOT_TOKEN must be set");

        let api_url = std::env::var("TELEGRAM_API_URL")
            .unwrap_or_else(|_| "https://api.telegram.org".into());

        let admins = AdminAllowList::parse(&std::env::var("ADMIN_IDS").unwrap_or_default())
            .unwrap_or_else(|e| panic!("ADMIN_IDS is invalid: {e}"));

        let mode = BotMode::parse(&std::env::var("BOT_MODE").unwrap_or_else(|_| "polling".into()))
            .expect("BOT_MODE must be 'polling' or 'webhook'");

        let webhook_url = non_empty_var("TELEGRAM_WEBHOOK_URL");
        if mode == BotMode::Webhook && webhook_url.is_none() {
            panic!("TELEGRAM_WEBHOOK_URL must be set when BOT_MODE=webhook");
        }

        let poll_timeout_secs: u64 = std::env::var("POLL_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("POLL_TIMEOUT_SECS must be a valid u64");

        Self {
            token,
            api_url,
            admins,
            mode,
            webhook_url,
            webhook_secret: non_empty_var("TELEGRAM_WEBHOOK_SECRET"),
            poll_timeout_secs,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
