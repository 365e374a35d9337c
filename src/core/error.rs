//! Error types for batching and store operations.

use thiserror::Error;

/// Errors produced by the batching layer and the reference store.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Backend configuration rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A spawning backend was requested without a runtime to spawn on.
    #[error("runtime unavailable: {0}")]
    RuntimeUnavailable(String),
    /// The underlying store rejected a dispatched action.
    #[error("dispatch failed: {0}")]
    Dispatch(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
