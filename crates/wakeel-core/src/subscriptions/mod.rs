//! Subscription records, status normalization, and transition detection.
//!
//! The dashboard reports subscription status as free-form, sometimes
//! localized strings. Everything funnels through [`NormalizedStatus`]
//! before any transition logic runs; unrecognized vocabulary is stored but
//! never reported as a transition, so unmapped strings can't false-alarm.

pub mod diff;
pub mod state;
pub mod types;

pub use diff::{SubscriptionDiff, diff_subscriptions};
pub use state::SubscriptionState;
pub use types::{NormalizedStatus, SubscriptionRecord, normalize_status};
