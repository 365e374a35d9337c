//! # Auto Batch
//!
//! Priority-aware batching of store subscriber notifications.
//!
//! A store notifies its subscribers after every dispatch. When a burst of
//! low-urgency updates arrives (progress ticks, streamed rows, cursor moves),
//! those notifications are wasted work: subscribers only need the state after
//! the burst. [`core::AutoBatchStore`] sits between the writer and the
//! subscribers and decides, per action, when notification happens.
//!
//! ## Behaviour
//!
//! - **Every action applies immediately.** State mutation is synchronous and
//!   ordered by dispatch, whatever the priority.
//! - **Normal-priority actions notify synchronously**, exactly as an
//!   unbatched store would.
//! - **Low-priority actions** (tagged with [`core::prepare_auto_batched`])
//!   defer notification to one flush submitted to a scheduling backend. Every
//!   low-priority action before that flush runs shares it.
//! - **A normal-priority action pre-empts a pending flush**: subscribers are
//!   notified at once and the flush, when it eventually fires, does nothing.
//!
//! ## Backends
//!
//! | Backend | Flush runs |
//! |---|---|
//! | `tick` | on the next runtime turn |
//! | `timer` | after a fixed delay |
//! | `animationFrame` (default) | at the next frame boundary |
//! | callback | whenever the caller's function decides |
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use auto_batch::builders::AutoBatchBuilder;
//! use auto_batch::config::BackendConfig;
//! use auto_batch::core::{prepare_auto_batched, Action, Store};
//!
//! let store = Arc::new(Store::new(0_u64, |n: &u64, a: &Action<u64>| Ok(n + a.payload)));
//! let batched = AutoBatchBuilder::new(store)
//!     .backend(BackendConfig::Timer { delay_ms: 10 })
//!     .build()?;
//!
//! batched.subscribe(|total| println!("total = {total}"));
//! for _ in 0..1_000 {
//!     batched.dispatch(prepare_auto_batched(1))?; // one notification, 10ms later
//! }
//! batched.dispatch(Action::new(1))?;             // notifies now, cancels the flush
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Actions, the store contract, and the batching scheduler.
pub mod core;
/// Configuration models for scheduling backends.
pub mod config;
/// Builders to construct batching stores from configuration.
pub mod builders;
/// Scheduling backend adapters.
pub mod infra;
/// Runtime adapters for spawning deferred flushes.
pub mod runtime;
/// Shared utilities.
pub mod util;
