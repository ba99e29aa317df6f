//! wakeel-core: Core library for the wakeel dashboard monitor
//!
//! This library implements the authenticated polling and change-detection
//! engine: it keeps a dashboard login session alive across runs, fetches
//! paginated collections through a browser driver, diffs them against
//! persisted state, and fans out notifications per category settings.
//!
//! # Main Entry Points
//!
//! - [`runner`] - Run guard and full run orchestration
//! - [`session`] - Auth session state machine and persistence
//! - [`fetch`] - Paginated authenticated collection fetches
//! - [`tickets`] / [`subscriptions`] - Change detection and state
//! - [`notify`] - Channels, renderers, and audience dispatch
//! - [`settings`] - Dual-source notification settings

pub mod browser;
pub mod errors;
pub mod fetch;
pub mod jitter;
pub mod logging;
pub mod notify;
pub mod runner;
pub mod session;
pub mod settings;
pub mod storage;
pub mod subscriptions;
pub mod tickets;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export config types so callers only need wakeel-core
pub use wakeel_config::{ConfigError, Secrets, WakeelConfig, WakeelPaths};

pub use browser::{BrowserError, BrowserSurface, StdioDriver, WaitPolicy};
pub use fetch::{Collection, FetchClient, FetchError};
pub use notify::{
    Audience, AudienceRole, Dispatcher, NotificationChannel, NotifyError, Rendered, TextStyle,
};
pub use runner::{RunError, RunOutcome, RunSummary, Runner};
pub use session::{AuthError, AuthSession, LoginCredentials, SessionManager};
pub use settings::{Category, NotificationSettings, SettingsHandle};
pub use subscriptions::{NormalizedStatus, SubscriptionDiff, SubscriptionRecord, SubscriptionState};
pub use tickets::{KnownTicketsState, TicketRecord, TicketStatus};

// Re-export logging initialization
pub use logging::init_logging;
