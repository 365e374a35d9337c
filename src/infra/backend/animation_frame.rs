//! Frame-aligned backend, the default.
//!
//! There is no display to sync with outside a UI host, so frames come from a
//! [`FrameClock`]: fixed-length intervals counted from the backend's creation.
//! Every flush submitted during a frame runs at that frame's end.

use std::time::Duration;

use tokio::time::Instant;

use crate::core::{BatchError, Flush, NotificationBackend, Spawn};

/// Refresh interval used when none is configured (about 60 Hz).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Fixed-rate frame boundaries anchored at an origin instant.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
    interval: Duration,
}

impl FrameClock {
    /// Start a clock whose first frame ends one `interval` from now.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidConfig`] for a zero interval.
    pub fn new(interval: Duration) -> Result<Self, BatchError> {
        Self::starting_at(Instant::now(), interval)
    }

    /// Start a clock anchored at `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidConfig`] for a zero interval.
    pub fn starting_at(origin: Instant, interval: Duration) -> Result<Self, BatchError> {
        if interval.is_zero() {
            return Err(BatchError::InvalidConfig(
                "frame interval must be greater than 0".into(),
            ));
        }
        Ok(Self { origin, interval })
    }

    /// Frame length.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time from `now` to the next frame boundary. A call landing exactly on a
    /// boundary waits a full frame.
    pub fn until_next_frame_at(&self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.origin).as_nanos();
        let interval = self.interval.as_nanos();
        let remaining = interval - elapsed % interval;
        Duration::from_nanos(u64::try_from(remaining).unwrap_or(u64::MAX))
    }

    /// Time from now to the next frame boundary.
    pub fn until_next_frame(&self) -> Duration {
        self.until_next_frame_at(Instant::now())
    }
}

/// Runs each flush at the next frame boundary.
#[derive(Debug, Clone)]
pub struct AnimationFrameBackend<S> {
    spawner: S,
    clock: FrameClock,
}

impl<S> AnimationFrameBackend<S> {
    /// Create a backend with an explicit frame clock.
    pub const fn new(spawner: S, clock: FrameClock) -> Self {
        Self { spawner, clock }
    }

    /// Create a backend ticking at `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidConfig`] for a zero interval.
    pub fn with_interval(spawner: S, interval: Duration) -> Result<Self, BatchError> {
        Ok(Self::new(spawner, FrameClock::new(interval)?))
    }

    /// The frame clock driving this backend.
    pub const fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

impl<S> NotificationBackend for AnimationFrameBackend<S>
where
    S: Spawn + Send + Sync,
{
    fn queue_notification(&self, flush: Flush) {
        let deadline = Instant::now() + self.clock.until_next_frame();
        self.spawner.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            flush();
        });
    }

    fn kind(&self) -> &'static str {
        "animationFrame"
    }
}
