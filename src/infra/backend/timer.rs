//! Fixed-delay backend.

use std::time::Duration;

use crate::core::{BatchError, Flush, NotificationBackend, Spawn};

/// Runs each flush after a delay fixed at construction.
#[derive(Debug, Clone)]
pub struct TimerBackend<S> {
    spawner: S,
    delay: Duration,
}

impl<S> TimerBackend<S> {
    /// Create a timer backend with the given delay.
    pub const fn new(spawner: S, delay: Duration) -> Self {
        Self { spawner, delay }
    }

    /// Create a timer backend from a millisecond delay.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidConfig`] if `delay_ms` is negative.
    pub fn from_millis(spawner: S, delay_ms: i64) -> Result<Self, BatchError> {
        let millis = u64::try_from(delay_ms).map_err(|_| {
            BatchError::InvalidConfig(format!("timer delay must be non-negative, got {delay_ms}ms"))
        })?;
        Ok(Self::new(spawner, Duration::from_millis(millis)))
    }

    /// Configured delay.
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl<S> NotificationBackend for TimerBackend<S>
where
    S: Spawn + Send + Sync,
{
    fn queue_notification(&self, flush: Flush) {
        let deadline = tokio::time::Instant::now() + self.delay;
        self.spawner.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            flush();
        });
    }

    fn kind(&self) -> &'static str {
        "timer"
    }
}
