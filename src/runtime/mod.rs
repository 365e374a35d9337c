//! Runtime adapters for spawning deferred flushes.

pub mod tokio_spawner;

pub use tokio_spawner::TokioSpawner;
