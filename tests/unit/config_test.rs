//! Tests for configuration validation

use std::collections::HashMap;

use auto_batch::config::batch::{ENV_DELAY_MS, ENV_FRAME_INTERVAL_MS, ENV_KIND};
use auto_batch::config::BackendConfig;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_default_is_animation_frame() {
    assert_eq!(
        BackendConfig::default(),
        BackendConfig::AnimationFrame {
            frame_interval_ms: 16
        }
    );
}

#[test]
fn test_timer_validation() {
    assert!(BackendConfig::Timer { delay_ms: 0 }.validate().is_ok());
    assert!(BackendConfig::Timer { delay_ms: 10 }.validate().is_ok());
    assert!(BackendConfig::Timer { delay_ms: -1 }.validate().is_err());
}

#[test]
fn test_frame_interval_validation() {
    let invalid = BackendConfig::AnimationFrame {
        frame_interval_ms: 0,
    };
    assert!(invalid.validate().is_err());
    assert!(BackendConfig::Tick.validate().is_ok());
}

#[test]
fn test_from_json() {
    assert_eq!(
        BackendConfig::from_json_str(r#"{ "kind": "tick" }"#).unwrap(),
        BackendConfig::Tick
    );
    assert_eq!(
        BackendConfig::from_json_str(r#"{ "kind": "timer", "delayMs": 25 }"#).unwrap(),
        BackendConfig::Timer { delay_ms: 25 }
    );
    assert_eq!(
        BackendConfig::from_json_str(r#"{ "kind": "animationFrame" }"#).unwrap(),
        BackendConfig::default()
    );
}

#[test]
fn test_from_json_rejects_invalid() {
    let negative = BackendConfig::from_json_str(r#"{ "kind": "timer", "delayMs": -5 }"#);
    assert!(negative.unwrap_err().contains("non-negative"));

    let unknown = BackendConfig::from_json_str(r#"{ "kind": "idle" }"#);
    assert!(unknown.unwrap_err().starts_with("parse error"));
}

#[test]
fn test_json_round_trip_shape() {
    let json = serde_json::to_value(BackendConfig::Timer { delay_ms: 10 }).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "timer", "delayMs": 10 }));
}

#[test]
fn test_from_lookup() {
    assert_eq!(
        BackendConfig::from_lookup(lookup(&[])).unwrap(),
        BackendConfig::default()
    );
    assert_eq!(
        BackendConfig::from_lookup(lookup(&[(ENV_KIND, "tick")])).unwrap(),
        BackendConfig::Tick
    );
    assert_eq!(
        BackendConfig::from_lookup(lookup(&[(ENV_KIND, "timer"), (ENV_DELAY_MS, "40")])).unwrap(),
        BackendConfig::Timer { delay_ms: 40 }
    );
    assert_eq!(
        BackendConfig::from_lookup(lookup(&[
            (ENV_KIND, "animation_frame"),
            (ENV_FRAME_INTERVAL_MS, "33"),
        ]))
        .unwrap(),
        BackendConfig::AnimationFrame {
            frame_interval_ms: 33
        }
    );
}

#[test]
fn test_from_lookup_errors() {
    assert!(BackendConfig::from_lookup(lookup(&[(ENV_KIND, "timer")])).is_err());
    assert!(
        BackendConfig::from_lookup(lookup(&[(ENV_KIND, "timer"), (ENV_DELAY_MS, "-3")])).is_err()
    );
    assert!(
        BackendConfig::from_lookup(lookup(&[(ENV_KIND, "timer"), (ENV_DELAY_MS, "soon")])).is_err()
    );
    assert!(BackendConfig::from_lookup(lookup(&[(ENV_KIND, "vsync")])).is_err());
}
