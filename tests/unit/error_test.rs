//! Tests for error types

use auto_batch::core::BatchError;

#[test]
fn test_invalid_config_error() {
    let err = BatchError::InvalidConfig("delay_ms must be non-negative".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: delay_ms must be non-negative"
    );
}

#[test]
fn test_runtime_unavailable_error() {
    let err = BatchError::RuntimeUnavailable("no runtime".to_string());
    assert_eq!(format!("{}", err), "runtime unavailable: no runtime");
}

#[test]
fn test_dispatch_error() {
    let err = BatchError::Dispatch("reducer failed".to_string());
    assert_eq!(format!("{}", err), "dispatch failed: reducer failed");
}
