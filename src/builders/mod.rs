//! Builders to construct batching stores from configuration.

pub mod batch_builder;

pub use batch_builder::{build_auto_batch, build_backend, AutoBatchBuilder};
