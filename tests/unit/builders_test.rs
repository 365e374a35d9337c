//! Tests for builder modules

use std::sync::Arc;

use auto_batch::builders::{build_auto_batch, build_backend, AutoBatchBuilder};
use auto_batch::config::BackendConfig;
use auto_batch::core::{prepare_auto_batched, Action, BatchError, Store};
use auto_batch::runtime::TokioSpawner;

type Counter = Store<u32, Action<u32>>;

fn store() -> Arc<Counter> {
    Arc::new(Store::new(0, |n: &u32, a: &Action<u32>| Ok(n + a.payload)))
}

#[test]
fn test_builder_defaults() {
    let builder = AutoBatchBuilder::new(store());
    assert_eq!(builder.config(), &BackendConfig::default());
    assert!(!builder.uses_callback());
}

#[test]
fn test_negative_delay_fails_at_build() {
    let err = AutoBatchBuilder::new(store())
        .backend(BackendConfig::Timer { delay_ms: -10 })
        .build()
        .err()
        .expect("negative delay must be rejected");
    assert!(matches!(err, BatchError::InvalidConfig(_)));
}

#[test]
fn test_zero_frame_interval_fails_at_build() {
    let err = AutoBatchBuilder::new(store())
        .backend(BackendConfig::AnimationFrame {
            frame_interval_ms: 0,
        })
        .build()
        .err()
        .expect("zero frame interval must be rejected");
    assert!(matches!(err, BatchError::InvalidConfig(_)));
}

#[test]
fn test_invalid_config_rejected_with_explicit_spawner() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let err = AutoBatchBuilder::new(store())
        .backend(BackendConfig::Timer { delay_ms: -1 })
        .spawner(TokioSpawner::from_runtime(&rt))
        .build()
        .err()
        .expect("negative delay must be rejected");
    assert!(matches!(err, BatchError::InvalidConfig(_)));

    let err = build_backend(
        &BackendConfig::AnimationFrame {
            frame_interval_ms: 0,
        },
        TokioSpawner::from_runtime(&rt),
    )
    .err()
    .expect("zero frame interval must be rejected");
    assert!(matches!(err, BatchError::InvalidConfig(_)));
}

#[test]
fn test_spawning_backend_needs_runtime() {
    let err = AutoBatchBuilder::new(store())
        .backend(BackendConfig::Tick)
        .build()
        .err()
        .expect("no runtime available");
    assert!(matches!(err, BatchError::RuntimeUnavailable(_)));
}

#[test]
fn test_callback_needs_no_runtime() {
    let batched = AutoBatchBuilder::new(store())
        .queue_notification(|flush| flush())
        .build()
        .unwrap();
    assert_eq!(batched.backend_kind(), "callback");
    batched.dispatch(prepare_auto_batched(2)).unwrap();
    assert!(!batched.is_notification_pending());
}

#[test]
fn test_backend_replaces_callback() {
    let builder = AutoBatchBuilder::new(store())
        .queue_notification(|flush| flush())
        .backend(BackendConfig::Tick);
    assert!(!builder.uses_callback());
}

#[test]
fn test_explicit_spawner() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let batched = AutoBatchBuilder::new(store())
        .backend(BackendConfig::Timer { delay_ms: 5 })
        .spawner(TokioSpawner::from_runtime(&rt))
        .build()
        .unwrap();
    assert_eq!(batched.backend_kind(), "timer");
}

#[tokio::test]
async fn test_build_auto_batch_uses_ambient_runtime() {
    let batched = build_auto_batch(store(), BackendConfig::default()).unwrap();
    assert_eq!(batched.backend_kind(), "animationFrame");
}
