//! Microtask-style backend: the flush runs as a fresh task on the runtime.

use crate::core::{Flush, NotificationBackend, Spawn};

/// Runs each flush as soon as the runtime polls a newly spawned task, after
/// the submitting dispatch has returned and ahead of any pending timers.
#[derive(Debug, Clone)]
pub struct TickBackend<S> {
    spawner: S,
}

impl<S> TickBackend<S> {
    /// Create a tick backend on the given spawner.
    pub const fn new(spawner: S) -> Self {
        Self { spawner }
    }
}

impl<S> NotificationBackend for TickBackend<S>
where
    S: Spawn + Send + Sync,
{
    fn queue_notification(&self, flush: Flush) {
        self.spawner.spawn(async move { flush() });
    }

    fn kind(&self) -> &'static str {
        "tick"
    }
}
