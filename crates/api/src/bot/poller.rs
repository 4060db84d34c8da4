//! Long-polling update loop.
//!
//! [`Poller::run`] repeatedly calls `getUpdates`, spawns one task per update
//! on the shared [`TaskTracker`], and backs off exponentially while Telegram
//! is unreachable. The loop exits when the [`CancellationToken`] fires.

use std::sync::Arc;

use charbot_telegram::TelegramApi;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::bot::backoff::Backoff;
use crate::bot::Dispatcher;

pub struct Poller {
    api: Arc<TelegramApi>,
    dispatcher: Arc<Dispatcher>,
    tasks: TaskTracker,
    timeout_secs: u64,
    backoff: Backoff,
}

impl Poller {
    pub fn new(
        api: Arc<TelegramApi>,
        dispatcher: Arc<Dispatcher>,
        tasks: TaskTracker,
        timeout_secs: u64,
    ) -> Self {
        Self {
            api,
            dispatcher,
            tasks,
            timeout_secs,
            backoff: Backoff::default(),
        }
    }

    /// Replace the retry pacing used after failed polls.
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Run until `cancel` is triggered.
    pub async fn run(self, cancel: CancellationToken) {
        let mut offset: Option<i64> = None;
        let mut backoff = self.backoff.clone();

        tracing::info!(timeout_secs = self.timeout_secs, "Polling for updates");

        loop {
            let result = tokio::select! {
                _ = cancel.cancelled() => break,
                result = self.api.get_updates(offset, self.timeout_secs) => result,
            };

            match result {
                Ok(updates) => {
                    backoff.reset();
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        let dispatcher = Arc::clone(&self.dispatcher);
                        self.tasks.spawn(async move { dispatcher.handle(update).await });
                    }
                }
                Err(e) => {
                    let delay = backoff.next_wait();
                    tracing::warn!(
                        error = %e,
                        retry_in_ms = delay.as_millis() as u64,
                        "getUpdates failed"
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }

        tracing::info!("Update polling stopped");
    }
}
