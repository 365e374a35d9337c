//! Scheduling capabilities consumed by the batching scheduler.

use std::future::Future;

/// Deferred notification handed to a backend. Invoking it more than once is
/// impossible by construction; invoking it late is always safe.
pub type Flush = Box<dyn FnOnce() + Send + 'static>;

/// Capability that runs a flush callback at some later point.
///
/// Implementations must eventually invoke each submitted flush exactly once.
/// Built-in backends invoke it asynchronously; caller-supplied ones may run it
/// inline, which the scheduler tolerates.
pub trait NotificationBackend: Send + Sync {
    /// Submit a flush for later execution.
    fn queue_notification(&self, flush: Flush);

    /// Short backend name for logs and stats.
    fn kind(&self) -> &'static str;
}

/// Abstraction for spawning flush tasks on a runtime.
pub trait Spawn {
    /// Spawn an async task that returns a future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;

    /// Spawner bound to the ambient runtime, if one is running.
    #[must_use]
    fn current() -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}
