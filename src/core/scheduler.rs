//! Priority-aware batching of subscriber notifications.
//!
//! [`AutoBatchStore`] wraps a [`NotifyingStore`] and intercepts every dispatch.
//! State changes always apply immediately. Normal-priority actions notify
//! subscribers synchronously; low-priority actions defer notification to a
//! single flush submitted to the bound [`NotificationBackend`], which covers
//! every low-priority action dispatched until it runs.
//!
//! A normal-priority dispatch while a flush is pending notifies at once and
//! clears the pending flag. Host timers cannot always be cancelled, so the
//! flush closure checks the flag itself and does nothing if it was cleared.
//!
//! Backends may run flushes on another thread. Every notification, synchronous
//! or deferred, happens under one reentrant lock per instance, so subscribers
//! are never called concurrently and the last state they see is the newest.
//! The lock is reentrant so a subscriber may dispatch from inside its callback.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use serde::{Deserialize, Serialize};

use crate::core::{Batchable, Flush, NotificationBackend, NotifyingStore};
use crate::util::serde::{Priority, SubscriptionId};

/// Scheduler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPhase {
    /// No flush pending.
    Idle,
    /// A flush has been submitted and has neither run nor been pre-empted.
    Pending,
}

/// Counters describing scheduler activity since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Successful dispatches.
    pub dispatched: u64,
    /// Successful low-priority dispatches.
    pub low_priority: u64,
    /// Low-priority dispatches absorbed by an already pending flush.
    pub coalesced: u64,
    /// Notifications issued synchronously by normal-priority dispatches.
    pub sync_notifications: u64,
    /// Notifications issued by backend flushes.
    pub deferred_notifications: u64,
    /// Pending flushes overtaken by a normal-priority dispatch.
    pub preempted: u64,
    /// Backend flushes that found nothing pending.
    pub stale_flushes: u64,
}

#[derive(Default)]
struct BatchState {
    notification_pending: AtomicBool,
    notify_lock: ReentrantMutex<()>,
    dispatched: AtomicU64,
    low_priority: AtomicU64,
    coalesced: AtomicU64,
    sync_notifications: AtomicU64,
    deferred_notifications: AtomicU64,
    preempted: AtomicU64,
    stale_flushes: AtomicU64,
}

impl BatchState {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// A store wrapper that batches subscriber notifications for low-priority
/// actions.
///
/// Each instance owns its own pending flag, so independent stores batch
/// independently. Clones share the store, backend, and batching state.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use auto_batch::core::{prepare_auto_batched, Action, AutoBatchStore, Store};
/// use auto_batch::infra::backend::CallbackBackend;
/// use parking_lot::Mutex;
///
/// let store = Arc::new(Store::new(0_u32, |n: &u32, a: &Action<u32>| Ok(n + a.payload)));
/// let queued = Arc::new(Mutex::new(Vec::new()));
/// let queue = Arc::clone(&queued);
/// let batched = AutoBatchStore::new(
///     store,
///     Arc::new(CallbackBackend::new(move |flush| queue.lock().push(flush))),
/// );
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let calls_clone = Arc::clone(&calls);
/// batched.subscribe(move |_| {
///     calls_clone.fetch_add(1, Ordering::SeqCst);
/// });
///
/// batched.dispatch(prepare_auto_batched(1)).unwrap();
/// batched.dispatch(prepare_auto_batched(2)).unwrap();
/// assert_eq!(calls.load(Ordering::SeqCst), 0);
///
/// for flush in queued.lock().drain(..) {
///     flush();
/// }
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub struct AutoBatchStore<S: NotifyingStore> {
    store: Arc<S>,
    backend: Arc<dyn NotificationBackend>,
    state: Arc<BatchState>,
}

impl<S: NotifyingStore> AutoBatchStore<S> {
    /// Wrap a store with a scheduling backend.
    ///
    /// Backends built from configuration should go through
    /// [`crate::builders::AutoBatchBuilder`], which validates it first.
    pub fn new(store: Arc<S>, backend: Arc<dyn NotificationBackend>) -> Self {
        Self {
            store,
            backend,
            state: Arc::new(BatchState::default()),
        }
    }

    /// Dispatch an action, notifying subscribers now or later by priority.
    ///
    /// The underlying dispatch result is returned unchanged. A failed
    /// dispatch leaves the batching state exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying store's `raw_dispatch` returns.
    pub fn dispatch(&self, action: S::Action) -> Result<S::Output, S::Error>
    where
        S::Action: Batchable,
    {
        let priority = action.priority();
        let output = self.store.raw_dispatch(action)?;
        BatchState::bump(&self.state.dispatched);

        match priority {
            Priority::Normal => {
                let _notifying = self.state.notify_lock.lock();
                if self.state.notification_pending.swap(false, Ordering::AcqRel) {
                    BatchState::bump(&self.state.preempted);
                    tracing::debug!(
                        backend = self.backend.kind(),
                        "normal-priority dispatch pre-empted pending flush"
                    );
                }
                BatchState::bump(&self.state.sync_notifications);
                self.store.notify_subscribers();
            }
            Priority::Low => {
                BatchState::bump(&self.state.low_priority);
                if self.state.notification_pending.swap(true, Ordering::AcqRel) {
                    BatchState::bump(&self.state.coalesced);
                    tracing::trace!("low-priority dispatch coalesced into pending flush");
                } else {
                    tracing::debug!(
                        backend = self.backend.kind(),
                        "scheduling deferred notification"
                    );
                    self.backend.queue_notification(self.flush());
                }
            }
        }

        Ok(output)
    }

    fn flush(&self) -> Flush {
        let store = Arc::clone(&self.store);
        let state = Arc::clone(&self.state);
        Box::new(move || {
            let _notifying = state.notify_lock.lock();
            if state.notification_pending.swap(false, Ordering::AcqRel) {
                BatchState::bump(&state.deferred_notifications);
                store.notify_subscribers();
            } else {
                BatchState::bump(&state.stale_flushes);
                tracing::debug!("flush found nothing pending, skipping");
            }
        })
    }

    /// Register a subscriber on the underlying store.
    pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&S::State) + Send + Sync + 'static,
    {
        self.store.subscribe(subscriber)
    }

    /// Remove a subscriber from the underlying store.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// The wrapped store.
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Name of the bound backend.
    pub fn backend_kind(&self) -> &'static str {
        self.backend.kind()
    }

    /// Whether a deferred flush is outstanding.
    pub fn is_notification_pending(&self) -> bool {
        self.state.notification_pending.load(Ordering::Acquire)
    }

    /// Current phase of the batching state machine.
    pub fn phase(&self) -> BatchPhase {
        if self.is_notification_pending() {
            BatchPhase::Pending
        } else {
            BatchPhase::Idle
        }
    }

    /// Snapshot of activity counters.
    pub fn stats(&self) -> BatchStats {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        BatchStats {
            dispatched: load(&self.state.dispatched),
            low_priority: load(&self.state.low_priority),
            coalesced: load(&self.state.coalesced),
            sync_notifications: load(&self.state.sync_notifications),
            deferred_notifications: load(&self.state.deferred_notifications),
            preempted: load(&self.state.preempted),
            stale_flushes: load(&self.state.stale_flushes),
        }
    }
}

impl<S: NotifyingStore> Clone for AutoBatchStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            backend: Arc::clone(&self.backend),
            state: Arc::clone(&self.state),
        }
    }
}
