//! Trait for outbound notification channels.

use async_trait::async_trait;

use super::errors::NotifyError;

/// Which rendering of a message a channel accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// HTML-formatted text with entities escaped.
    Rich,
    /// Plain text, no markup.
    Plain,
}

/// An outbound messaging channel.
///
/// Channels are transport only. Audience selection and per-category
/// gating live in the dispatcher.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Channel identifier, referenced by audience definitions.
    fn name(&self) -> &'static str;

    /// Which message rendering this channel expects.
    fn style(&self) -> TextStyle;

    /// Deliver one message to one destination.
    async fn send(&self, destination: &str, text: &str) -> Result<(), NotifyError>;
}
