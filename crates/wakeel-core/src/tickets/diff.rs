//! Ticket change detection.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use super::state::KnownTicketsState;
use super::types::TicketRecord;

/// Return fetched tickets whose identity is not yet known, in fetched
/// order (server order, typically newest-first).
///
/// Does not mutate `known`: the caller must insert the returned ids and
/// persist *before* notifying, so a crash between detection and dispatch
/// costs a missed notification rather than a duplicate.
pub fn diff_new_tickets(
    fetched: &[TicketRecord],
    known: &KnownTicketsState,
) -> Vec<TicketRecord> {
    let new: Vec<TicketRecord> = fetched
        .iter()
        .filter(|t| !known.contains(&t.display_id))
        .cloned()
        .collect();

    info!(
        event = "core.tickets.diff_completed",
        fetched = fetched.len(),
        known = known.len(),
        new = new.len(),
    );
    new
}

/// Whether a newly-detected ticket is fresh enough to notify about.
///
/// Tickets older than `max_age` are recorded as known but stay silent —
/// this is the guard against a reset or corrupted known-set flooding the
/// business audiences with historical tickets. A missing or unparsed
/// creation timestamp counts as fresh; the flood guard is about provably
/// old items, not about punishing sparse data.
pub fn within_notify_window(
    ticket: &TicketRecord,
    max_age: Duration,
    now: DateTime<Utc>,
) -> bool {
    match ticket.created_at {
        Some(created_at) => now.signed_duration_since(created_at) <= max_age,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ticket(id: &str, age_hours: i64) -> TicketRecord {
        TicketRecord {
            display_id: id.to_string(),
            created_at: Some(Utc::now() - Duration::hours(age_hours)),
            status: None,
            summary: None,
            partner: None,
            customer: None,
            detail: None,
            zone: None,
        }
    }

    fn state_with(ids: &[&str]) -> KnownTicketsState {
        let dir = TempDir::new().unwrap();
        let mut state = KnownTicketsState::load(&dir.path().join("k.json")).unwrap();
        for id in ids {
            state.insert(id);
        }
        state
    }

    #[test]
    fn only_unknown_ids_are_returned_in_fetched_order() {
        let fetched = vec![ticket("TCK-3", 1), ticket("TCK-2", 2), ticket("TCK-1", 3)];
        let known = state_with(&["TCK-2"]);

        let new = diff_new_tickets(&fetched, &known);
        let ids: Vec<&str> = new.iter().map(|t| t.display_id.as_str()).collect();
        assert_eq!(ids, vec!["TCK-3", "TCK-1"]);
    }

    #[test]
    fn all_known_yields_empty_diff() {
        let fetched = vec![ticket("TCK-1", 1)];
        let known = state_with(&["TCK-1"]);
        assert!(diff_new_tickets(&fetched, &known).is_empty());
    }

    #[test]
    fn repeated_diff_does_not_resurface_inserted_ids() {
        let fetched = vec![ticket("TCK-1", 1), ticket("TCK-2", 1)];
        let mut known = state_with(&[]);

        let first = diff_new_tickets(&fetched, &known);
        assert_eq!(first.len(), 2);
        for t in &first {
            known.insert(&t.display_id);
        }

        // Same collection fetched again next run: nothing new.
        assert!(diff_new_tickets(&fetched, &known).is_empty());
    }

    #[test]
    fn old_ticket_is_outside_notify_window() {
        let max_age = Duration::hours(24);
        assert!(within_notify_window(&ticket("TCK-1", 2), max_age, Utc::now()));
        assert!(!within_notify_window(&ticket("TCK-2", 30), max_age, Utc::now()));
    }

    #[test]
    fn missing_timestamp_counts_as_fresh() {
        let mut t = ticket("TCK-1", 0);
        t.created_at = None;
        assert!(within_notify_window(&t, Duration::hours(24), Utc::now()));
    }
}
