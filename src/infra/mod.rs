//! Infrastructure adapters: the scheduling backends.

pub mod backend;

pub use backend::{AnimationFrameBackend, CallbackBackend, TickBackend, TimerBackend};
