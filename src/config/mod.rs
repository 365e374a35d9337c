//! Configuration models for the scheduling backend.

pub mod batch;

pub use batch::BackendConfig;
