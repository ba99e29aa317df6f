//! Outbound notification fan-out.
//!
//! Messages flow through three stages: rendering (one message, rich and
//! plain forms at once), channels (transport to Telegram or the business
//! messaging API), and the dispatcher (audience selection and per-category
//! gating). Business events respect the notification settings for
//! secondary audiences; the primary audience and operator messages are
//! never gated.

pub mod channels;
pub mod dispatcher;
pub mod errors;
pub mod render;
pub mod traits;

pub use channels::{BusinessChannel, TelegramChannel};
pub use dispatcher::{Audience, AudienceRole, Dispatcher};
pub use errors::NotifyError;
pub use render::{
    Rendered, escape_html, render_new_ticket, render_operator_note, render_started_summary,
    render_subscription_event,
};
pub use traits::{NotificationChannel, TextStyle};
