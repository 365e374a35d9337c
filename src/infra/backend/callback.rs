//! Caller-supplied scheduling.

use std::fmt;

use crate::core::{Flush, NotificationBackend};

type QueueNotification = Box<dyn Fn(Flush) + Send + Sync>;

/// Hands each flush to a caller function, which decides when to run it:
/// throttled, debounced, on an external event loop, or inline.
///
/// The function must eventually call every flush it receives exactly once.
pub struct CallbackBackend {
    queue_notification: QueueNotification,
}

impl CallbackBackend {
    /// Wrap a scheduling function.
    pub fn new<F>(queue_notification: F) -> Self
    where
        F: Fn(Flush) + Send + Sync + 'static,
    {
        Self {
            queue_notification: Box::new(queue_notification),
        }
    }
}

impl fmt::Debug for CallbackBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackBackend").finish_non_exhaustive()
    }
}

impl NotificationBackend for CallbackBackend {
    fn queue_notification(&self, flush: Flush) {
        (self.queue_notification)(flush);
    }

    fn kind(&self) -> &'static str {
        "callback"
    }
}
