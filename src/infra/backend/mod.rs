//! Scheduling backends for deferred notification flushes.

pub mod animation_frame;
pub mod callback;
pub mod tick;
pub mod timer;

pub use animation_frame::{AnimationFrameBackend, FrameClock, DEFAULT_FRAME_INTERVAL};
pub use callback::CallbackBackend;
pub use tick::TickBackend;
pub use timer::TimerBackend;
