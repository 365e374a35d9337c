//! Core batching abstractions: actions, the store contract, and the scheduler.

pub mod action;
pub mod backend;
pub mod error;
pub mod scheduler;
pub mod store;

pub use action::{prepare_auto_batched, Action, ActionMeta, Batchable, AUTO_BATCH_KEY};
pub use backend::{Flush, NotificationBackend, Spawn};
pub use error::{AppResult, BatchError};
pub use scheduler::{AutoBatchStore, BatchPhase, BatchStats};
pub use store::{NotifyingStore, Store, Subscriber};
