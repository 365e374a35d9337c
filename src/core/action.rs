//! Actions, the batch marker, and priority classification.
//!
//! An action is an opaque payload plus metadata. The only metadata this crate
//! reads is the batch marker: when set, the action is [`Priority::Low`] and its
//! subscriber notification may be coalesced with neighbouring low-priority
//! actions. On the wire the marker is a boolean field under `meta`:
//!
//! ```json
//! { "payload": { "progress": 42 }, "meta": { "autoBatch": true } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::util::serde::Priority;

/// Metadata key carrying the batch marker in serialized actions.
pub const AUTO_BATCH_KEY: &str = "autoBatch";

/// Opaque batch marker. Deserializes from any JSON value using truthiness so
/// logs written by older producers (string tokens, numbers) still classify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "bool")]
struct BatchMarker(bool);

impl BatchMarker {
    #[allow(clippy::trivially_copy_pass_by_ref)]
    const fn is_unset(&self) -> bool {
        !self.0
    }
}

impl From<Value> for BatchMarker {
    fn from(value: Value) -> Self {
        Self(is_truthy(&value))
    }
}

impl From<BatchMarker> for bool {
    fn from(marker: BatchMarker) -> Self {
        marker.0
    }
}

/// Action metadata.
///
/// Keys other than the batch marker are kept as-is so serialized actions
/// round-trip without losing producer metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMeta {
    #[serde(rename = "autoBatch", default, skip_serializing_if = "BatchMarker::is_unset")]
    auto_batch: BatchMarker,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ActionMeta {
    /// Metadata with the batch marker set.
    #[must_use]
    pub fn auto_batched() -> Self {
        Self {
            auto_batch: BatchMarker(true),
            extra: Map::new(),
        }
    }

    /// Metadata entries other than the batch marker.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Set a metadata entry other than the batch marker.
    ///
    /// Returns the previous value for `key`. The batch marker itself is only
    /// set through [`ActionMeta::auto_batched`], so `autoBatch` is rejected
    /// here and `None` is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if key == AUTO_BATCH_KEY {
            return None;
        }
        self.extra.insert(key, value)
    }

    /// Whether the batch marker is present and truthy.
    #[must_use]
    pub const fn is_auto_batched(&self) -> bool {
        self.auto_batch.0
    }

    /// Priority implied by the marker.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        if self.auto_batch.0 {
            Priority::Low
        } else {
            Priority::Normal
        }
    }
}

/// A unit of work dispatched to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action<P> {
    /// Caller payload, opaque to the batching layer.
    pub payload: P,
    /// Metadata; only the batch marker is interpreted, other keys pass through.
    #[serde(default)]
    pub meta: ActionMeta,
}

impl<P> Action<P> {
    /// Wrap a payload as a normal-priority action.
    pub fn new(payload: P) -> Self {
        Self {
            payload,
            meta: ActionMeta::default(),
        }
    }

    /// Whether this action carries the batch marker.
    pub const fn is_auto_batched(&self) -> bool {
        self.meta.is_auto_batched()
    }
}

/// Wrap a payload as a low-priority, auto-batched action.
///
/// Pure: every call builds fresh metadata, so equal payloads produce equal
/// actions and no state is shared between calls.
///
/// ```
/// use auto_batch::core::{prepare_auto_batched, Batchable};
/// use auto_batch::util::Priority;
///
/// let action = prepare_auto_batched("tick");
/// assert_eq!(action.priority(), Priority::Low);
/// ```
pub fn prepare_auto_batched<P>(payload: P) -> Action<P> {
    Action {
        payload,
        meta: ActionMeta::auto_batched(),
    }
}

/// Classification of dispatched actions into notification priorities.
pub trait Batchable {
    /// Priority of this action; `Normal` unless the batch marker is truthy.
    fn priority(&self) -> Priority;
}

impl<P> Batchable for Action<P> {
    fn priority(&self) -> Priority {
        self.meta.priority()
    }
}

/// Raw JSON actions classify by `meta.autoBatch` truthiness.
impl Batchable for Value {
    fn priority(&self) -> Priority {
        let marked = self
            .get("meta")
            .and_then(|meta| meta.get(AUTO_BATCH_KEY))
            .is_some_and(is_truthy);
        if marked {
            Priority::Low
        } else {
            Priority::Normal
        }
    }
}

impl<T: Batchable + ?Sized> Batchable for &T {
    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

impl<T: Batchable + ?Sized> Batchable for Box<T> {
    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
