use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charbot_api::bot::{command, Dispatcher, Poller};
use charbot_api::config::{BotConfig, BotMode, ServerConfig};
use charbot_api::router::build_app_router;
use charbot_api::state::AppState;
use charbot_db::PgCharacterStore;
use charbot_telegram::TelegramApi;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charbot_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let bot_config = BotConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        mode = ?bot_config.mode,
        admins = bot_config.admins.len(),
        "Loaded configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = charbot_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    charbot_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    charbot_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Telegram ---
    let telegram = Arc::new(TelegramApi::new(
        bot_config.api_url.clone(),
        bot_config.token.clone(),
    ));
    let me = telegram
        .get_me()
        .await
        .expect("Failed to reach Telegram (check TELEGRAM_BOT_TOKEN)");
    tracing::info!(username = ?me.username, "Connected to Telegram");

    if let Err(e) = telegram.set_my_commands(&command::menu()).await {
        tracing::warn!(error = %e, "Failed to register bot commands");
    } else {
        tracing::info!("Bot commands have been set");
    }

    match bot_config.mode {
        BotMode::Polling => telegram
            .delete_webhook()
            .await
            .expect("Failed to delete webhook before polling"),
        BotMode::Webhook => {
            if bot_config.webhook_secret.is_none() {
                tracing::warn!("TELEGRAM_WEBHOOK_SECRET is not set; webhook deliveries are unauthenticated");
            }
            let url = bot_config
                .webhook_url
                .as_deref()
                .expect("TELEGRAM_WEBHOOK_URL must be set when BOT_MODE=webhook");
            telegram
                .set_webhook(url, bot_config.webhook_secret.as_deref())
                .await
                .expect("Failed to register webhook");
            tracing::info!(%url, "Webhook registered");
        }
    }

    // --- Bot runtime ---
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(PgCharacterStore::new(pool.clone())),
        telegram.clone(),
        bot_config.admins.clone(),
        me.username,
    ));
    let tasks = TaskTracker::new();
    let poll_cancel = CancellationToken::new();

    let poll_handle = (bot_config.mode == BotMode::Polling).then(|| {
        let poller = Poller::new(
            Arc::clone(&telegram),
            Arc::clone(&dispatcher),
            tasks.clone(),
            bot_config.poll_timeout_secs,
        );
        tokio::spawn(poller.run(poll_cancel.clone()))
    });

    // --- App state ---
    let state = AppState {
        dispatcher,
        tasks: tasks.clone(),
        webhook_secret: bot_config.webhook_secret.as_deref().map(Arc::from),
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, bot_config.mode == BotMode::Webhook);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    poll_cancel.cancel();
    if let Some(handle) = poll_handle {
        let _ = handle.await;
    }

    tasks.close();
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, tasks.wait()).await.is_err() {
        tracing::warn!(
            pending = tasks.len(),
            "Timed out waiting for in-flight updates"
        );
    }

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("SIGINT received, shutting down");
        }
        () = terminate => {
            tracing::info!("SIGTERM received, shutting down");
        }
    }
}
