//! Support-ticket records, persisted known-set, and change detection.
//!
//! Only ticket *creation* is monitored. Status is carried for display, not
//! tracked for transitions.

pub mod diff;
pub mod state;
pub mod types;

pub use diff::{diff_new_tickets, within_notify_window};
pub use state::KnownTicketsState;
pub use types::{DisplayRef, TicketRecord, TicketStatus};

/// Query string asking the server for newest-first ordering.
pub const SORT_NEWEST_FIRST: &str = "sortCriteria.property=createdAt&sortCriteria.direction=desc";
