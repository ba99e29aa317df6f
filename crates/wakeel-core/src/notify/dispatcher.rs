//! Audience-based notification fan-out.
//!
//! The dispatcher owns the channel set and the audience table. Business
//! events fan out to the primary audience always and to secondary
//! audiences only when the event's category is enabled in settings.
//! Operator messages bypass settings entirely. A failed send is logged
//! and skipped; one dead channel never blocks the rest of the fan-out.

use tracing::{info, warn};
use wakeel_config::DelayRange;

use crate::jitter;
use crate::settings::{Category, NotificationSettings};

use super::render::Rendered;
use super::traits::{NotificationChannel, TextStyle};

/// Who a destination belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudienceRole {
    /// Account owner. Receives every business event regardless of settings.
    Primary,
    /// Additional business audience, gated per category.
    Secondary,
    /// Developer/operator. Receives system-health messages only.
    Operator,
}

/// One destination on one channel.
#[derive(Debug, Clone)]
pub struct Audience {
    pub role: AudienceRole,
    /// Channel name, matched against [`NotificationChannel::name`].
    pub channel: &'static str,
    pub destination: String,
}

pub struct Dispatcher {
    channels: Vec<Box<dyn NotificationChannel>>,
    audiences: Vec<Audience>,
    inter_message_delay: DelayRange,
}

impl Dispatcher {
    pub fn new(
        channels: Vec<Box<dyn NotificationChannel>>,
        audiences: Vec<Audience>,
        inter_message_delay: DelayRange,
    ) -> Self {
        Self {
            channels,
            audiences,
            inter_message_delay,
        }
    }

    fn channel(&self, name: &str) -> Option<&dyn NotificationChannel> {
        self.channels
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    async fn send_to(&self, audience: &Audience, message: &Rendered) -> bool {
        let Some(channel) = self.channel(audience.channel) else {
            warn!(
                event = "core.notify.channel_missing",
                channel = audience.channel,
            );
            return false;
        };

        let text = match channel.style() {
            TextStyle::Rich => &message.rich,
            TextStyle::Plain => &message.plain,
        };

        match channel.send(&audience.destination, text).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    event = "core.notify.send_failed",
                    channel = audience.channel,
                    destination = %audience.destination,
                    error = %e,
                );
                false
            }
        }
    }

    /// Fan a business event out to its audiences. Returns the number of
    /// successful deliveries.
    pub async fn dispatch_business(
        &self,
        category: Category,
        settings: &NotificationSettings,
        message: &Rendered,
    ) -> usize {
        let mut delivered = 0;
        let mut first = true;

        for audience in &self.audiences {
            let eligible = match audience.role {
                AudienceRole::Primary => true,
                AudienceRole::Secondary => settings.is_enabled(category),
                AudienceRole::Operator => false,
            };
            if !eligible {
                continue;
            }

            if !first {
                jitter::sleep_ms(&self.inter_message_delay).await;
            }
            first = false;

            if self.send_to(audience, message).await {
                delivered += 1;
            }
        }

        info!(
            event = "core.notify.business_dispatched",
            category = category.key(),
            delivered = delivered,
        );
        delivered
    }

    /// Send a system-health message to every operator audience. Never
    /// gated by settings.
    pub async fn dispatch_operator(&self, message: &Rendered) -> usize {
        let mut delivered = 0;
        for audience in &self.audiences {
            if audience.role != AudienceRole::Operator {
                continue;
            }
            if self.send_to(audience, message).await {
                delivered += 1;
            }
        }

        info!(event = "core.notify.operator_dispatched", delivered = delivered);
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingChannel;

    fn message() -> Rendered {
        Rendered {
            rich: "<b>rich</b>".to_string(),
            plain: "plain".to_string(),
        }
    }

    fn no_delay() -> DelayRange {
        DelayRange {
            min_ms: 0,
            max_ms: 0,
        }
    }

    fn audiences() -> Vec<Audience> {
        vec![
            Audience {
                role: AudienceRole::Primary,
                channel: "telegram",
                destination: "owner".to_string(),
            },
            Audience {
                role: AudienceRole::Secondary,
                channel: "telegram",
                destination: "group".to_string(),
            },
            Audience {
                role: AudienceRole::Operator,
                channel: "telegram",
                destination: "operator".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn enabled_category_reaches_primary_and_secondary() {
        let (channel, sent) = RecordingChannel::new("telegram", TextStyle::Rich);
        let dispatcher = Dispatcher::new(vec![Box::new(channel)], audiences(), no_delay());

        let delivered = dispatcher
            .dispatch_business(
                Category::TicketCreated,
                &NotificationSettings::default(),
                &message(),
            )
            .await;
        assert_eq!(delivered, 2);

        let destinations: Vec<String> =
            sent.lock().unwrap().iter().map(|(d, _)| d.clone()).collect();
        assert_eq!(destinations, vec!["owner", "group"]);
    }

    #[tokio::test]
    async fn disabled_category_still_reaches_primary() {
        let (channel, sent) = RecordingChannel::new("telegram", TextStyle::Rich);
        let dispatcher = Dispatcher::new(vec![Box::new(channel)], audiences(), no_delay());

        let mut settings = NotificationSettings::default();
        settings.set(Category::SubscriptionRenewed, false);

        let delivered = dispatcher
            .dispatch_business(Category::SubscriptionRenewed, &settings, &message())
            .await;
        assert_eq!(delivered, 1);
        assert_eq!(sent.lock().unwrap()[0].0, "owner");
    }

    #[tokio::test]
    async fn operator_dispatch_ignores_settings() {
        let (channel, sent) = RecordingChannel::new("telegram", TextStyle::Rich);
        let dispatcher = Dispatcher::new(vec![Box::new(channel)], audiences(), no_delay());

        let mut settings = NotificationSettings::default();
        for category in Category::ALL {
            settings.set(category, false);
        }

        assert_eq!(dispatcher.dispatch_operator(&message()).await, 1);
        assert_eq!(sent.lock().unwrap()[0].0, "operator");
    }

    #[tokio::test]
    async fn failed_send_does_not_block_remaining_audiences() {
        let failing = Box::new(RecordingChannel::failing("telegram"));
        let (plain, sent) = RecordingChannel::new("business", TextStyle::Plain);
        let audiences = vec![
            Audience {
                role: AudienceRole::Primary,
                channel: "telegram",
                destination: "owner".to_string(),
            },
            Audience {
                role: AudienceRole::Secondary,
                channel: "business",
                destination: "dest".to_string(),
            },
        ];
        let dispatcher = Dispatcher::new(vec![failing, Box::new(plain)], audiences, no_delay());

        let delivered = dispatcher
            .dispatch_business(
                Category::TicketCreated,
                &NotificationSettings::default(),
                &message(),
            )
            .await;
        assert_eq!(delivered, 1);
        assert_eq!(sent.lock().unwrap()[0].0, "dest");
    }

    #[tokio::test]
    async fn channel_style_picks_the_matching_rendering() {
        let (plain, sent) = RecordingChannel::new("business", TextStyle::Plain);
        let audiences = vec![Audience {
            role: AudienceRole::Primary,
            channel: "business",
            destination: "dest".to_string(),
        }];
        let dispatcher = Dispatcher::new(vec![Box::new(plain)], audiences, no_delay());

        dispatcher
            .dispatch_business(
                Category::TicketCreated,
                &NotificationSettings::default(),
                &message(),
            )
            .await;

        assert_eq!(sent.lock().unwrap()[0].1, "plain");
    }

    #[tokio::test]
    async fn unknown_channel_name_is_skipped() {
        let (channel, _sent) = RecordingChannel::new("telegram", TextStyle::Rich);
        let audiences = vec![Audience {
            role: AudienceRole::Primary,
            channel: "pigeon",
            destination: "coop".to_string(),
        }];
        let dispatcher = Dispatcher::new(vec![Box::new(channel)], audiences, no_delay());

        let delivered = dispatcher
            .dispatch_business(
                Category::TicketCreated,
                &NotificationSettings::default(),
                &message(),
            )
            .await;
        assert_eq!(delivered, 0);
    }
}
