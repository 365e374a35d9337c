//! Tests for utility functions

use auto_batch::util::{init_tracing, Priority, SubscriptionId};

#[test]
fn test_priority_ordering() {
    assert!(Priority::Normal > Priority::Low);
    assert_eq!(Priority::default(), Priority::Normal);
}

#[test]
fn test_priority_serde() {
    assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"low\"");
    let parsed: Priority = serde_json::from_str("\"normal\"").unwrap();
    assert_eq!(parsed, Priority::Normal);
}

#[test]
fn test_subscription_id_display() {
    assert_eq!(SubscriptionId(7).to_string(), "sub-7");
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
