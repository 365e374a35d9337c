//! Store collaborator contract and a reducer-driven reference store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::{AppResult, BatchError};
use crate::util::serde::SubscriptionId;

/// Subscriber callback receiving a snapshot of the state.
pub type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

type Reducer<T, A> = Box<dyn Fn(&T, &A) -> AppResult<T> + Send + Sync>;

/// Operations the batching layer needs from an underlying store.
///
/// `raw_dispatch` and `notify_subscribers` must both run synchronously on the
/// caller's thread and return before the batching layer's own call returns.
pub trait NotifyingStore: Send + Sync + 'static {
    /// State handed to subscribers.
    type State;
    /// Dispatched unit of work.
    type Action;
    /// Result of a successful dispatch, passed through unchanged.
    type Output;
    /// Dispatch failure, passed through unchanged.
    type Error;

    /// Apply an action immediately, without notifying subscribers.
    fn raw_dispatch(&self, action: Self::Action) -> Result<Self::Output, Self::Error>;

    /// Call every registered subscriber once, in subscription order.
    fn notify_subscribers(&self);

    /// Register a subscriber.
    fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&Self::State) + Send + Sync + 'static;

    /// Remove a subscriber; returns false if it was not registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// A thread-safe, reducer-driven state container.
///
/// Dispatching runs the reducer against the current state and commits the
/// returned state only if the reducer succeeds. Notification is separate and
/// explicit, which is what lets a batching layer decide when it happens.
pub struct Store<T, A> {
    state: RwLock<T>,
    reducer: Reducer<T, A>,
    subscribers: RwLock<Vec<(SubscriptionId, Subscriber<T>)>>,
    next_id: AtomicU64,
}

impl<T, A> Store<T, A>
where
    T: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    /// Create a store with an initial state and a reducer.
    pub fn new<R>(initial: T, reducer: R) -> Self
    where
        R: Fn(&T, &A) -> AppResult<T> + Send + Sync + 'static,
    {
        Self {
            state: RwLock::new(initial),
            reducer: Box::new(reducer),
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Get a clone of the current state.
    pub fn state(&self) -> T {
        self.state.read().clone()
    }

    /// Read state without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&*self.state.read())
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl<T, A> NotifyingStore for Store<T, A>
where
    T: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    type State = T;
    type Action = A;
    type Output = A;
    type Error = BatchError;

    fn raw_dispatch(&self, action: A) -> Result<A, BatchError> {
        let mut state = self.state.write();
        match (self.reducer)(&*state, &action) {
            Ok(next) => {
                *state = next;
                Ok(action)
            }
            Err(e) => {
                tracing::warn!("reducer rejected action: {e:#}");
                Err(BatchError::Dispatch(format!("{e:#}")))
            }
        }
    }

    fn notify_subscribers(&self) {
        // Snapshot both so subscribers can read the store or unsubscribe.
        let state = self.state.read().clone();
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        for subscriber in &subscribers {
            subscriber(&state);
        }
    }

    fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().push((id, Arc::new(subscriber)));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }
}
