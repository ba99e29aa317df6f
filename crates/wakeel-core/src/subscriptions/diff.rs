//! Subscription transition detection.

use tracing::info;

use super::state::SubscriptionState;
use super::types::{NormalizedStatus, SubscriptionRecord};

/// Per-run subscription diff, in fetched order.
#[derive(Debug, Default)]
pub struct SubscriptionDiff {
    /// active -> expired transitions.
    pub expired: Vec<SubscriptionRecord>,
    /// expired -> active transitions.
    pub renewed: Vec<SubscriptionRecord>,
    /// Identities never seen before, whatever their current status. A
    /// subscription first observed while already expired is "new", never
    /// an expiry — the engine cannot claim a transition it never saw.
    pub added: Vec<SubscriptionRecord>,
}

impl SubscriptionDiff {
    pub fn is_empty(&self) -> bool {
        self.expired.is_empty() && self.renewed.is_empty() && self.added.is_empty()
    }
}

/// Classify fetched subscriptions against the last-observed state.
///
/// Pure — the caller records every fetched observation into the state (and
/// persists it) before notifying. Only active<->expired transitions are
/// alert-worthy; any change involving unrecognized vocabulary updates the
/// stored status silently.
pub fn diff_subscriptions(
    fetched: &[SubscriptionRecord],
    known: &SubscriptionState,
) -> SubscriptionDiff {
    let mut diff = SubscriptionDiff::default();

    for record in fetched {
        let new_status = record.normalized_status();
        match known.get(&record.id) {
            None => diff.added.push(record.clone()),
            Some(old_status) => match (old_status, &new_status) {
                (NormalizedStatus::Active, NormalizedStatus::Expired) => {
                    diff.expired.push(record.clone());
                }
                (NormalizedStatus::Expired, NormalizedStatus::Active) => {
                    diff.renewed.push(record.clone());
                }
                // Unchanged, or a change into/out of unrecognized
                // vocabulary: stored silently, never reported.
                _ => {}
            },
        }
    }

    info!(
        event = "core.subscriptions.diff_completed",
        fetched = fetched.len(),
        known = known.len(),
        expired = diff.expired.len(),
        renewed = diff.renewed.len(),
        added = diff.added.len(),
    );
    diff
}
