//! Serializable identifiers and classification types shared across the crate.

use serde::{Deserialize, Serialize};

/// Notification priority derived from an action's batch marker.
///
/// Ordering follows urgency: `Normal` outranks `Low`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Subscriber notification may be deferred and coalesced.
    Low,
    /// Subscribers are notified synchronously with the dispatch.
    #[default]
    Normal,
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}
