//! Retry pacing for `getUpdates` while Telegram is unreachable.

use std::time::Duration;

const FLOOR: Duration = Duration::from_secs(1);
const CEILING: Duration = Duration::from_secs(60);

/// Doubling delay between failed polls, clamped to `[floor, ceiling]`.
#[derive(Debug, Clone)]
pub struct Backoff {
    floor: Duration,
    ceiling: Duration,
    current: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(FLOOR, CEILING)
    }
}

impl Backoff {
    pub fn new(floor: Duration, ceiling: Duration) -> Self {
        Self {
            floor,
            ceiling,
            current: floor,
        }
    }

    /// Delay to wait now; the following call returns twice as much.
    pub fn next_wait(&mut self) -> Duration {
        let wait = self.current;
        self.current = self.current.saturating_mul(2).min(self.ceiling);
        wait
    }

    /// Back to the floor after a successful poll.
    pub fn reset(&mut self) {
        self.current = self.floor;
    }
}
