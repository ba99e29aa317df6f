//! Message rendering for outbound notifications.
//!
//! Every message is produced in two forms at once: a rich HTML rendering
//! (all dynamic values entity-escaped) and a plain-text rendering. Each
//! channel picks the form matching its [`TextStyle`](super::TextStyle).

use crate::settings::Category;
use crate::subscriptions::SubscriptionRecord;
use crate::tickets::{DisplayRef, TicketRecord};

/// A message rendered for both channel styles.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub rich: String,
    pub plain: String,
}

/// Escape text for HTML message bodies.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn display_of(field: &Option<DisplayRef>) -> Option<&str> {
    field.as_ref().and_then(|r| r.display_value.as_deref())
}

struct MessageBuilder {
    rich: String,
    plain: String,
}

impl MessageBuilder {
    fn new(title: &str) -> Self {
        Self {
            rich: format!("<b>{}</b>", escape_html(title)),
            plain: title.to_string(),
        }
    }

    fn field(&mut self, label: &str, value: &str) {
        self.rich
            .push_str(&format!("\n<b>{label}:</b> {}", escape_html(value)));
        self.plain.push_str(&format!("\n{label}: {value}"));
    }

    fn field_opt(&mut self, label: &str, value: Option<&str>) {
        if let Some(value) = value {
            if !value.is_empty() {
                self.field(label, value);
            }
        }
    }

    fn link(&mut self, label: &str, url: &str) {
        self.rich
            .push_str(&format!("\n<a href=\"{}\">{}</a>", escape_html(url), escape_html(label)));
        self.plain.push_str(&format!("\n{url}"));
    }

    fn build(self) -> Rendered {
        Rendered {
            rich: self.rich,
            plain: self.plain,
        }
    }
}

/// Render a newly observed support ticket, with a deep link into the
/// dashboard when the ticket carries its internal id.
pub fn render_new_ticket(ticket: &TicketRecord, dashboard_base_url: &str) -> Rendered {
    let mut message = MessageBuilder::new("🆕 New support ticket");
    message.field("Ticket", &ticket.display_id);
    message.field_opt("Type", display_of(&ticket.detail));
    if let Some(status) = ticket.status {
        message.field("Status", &status.to_string());
    }
    if let Some(created_at) = ticket.created_at {
        message.field("Created", &created_at.format("%Y-%m-%d %H:%M UTC").to_string());
    }
    message.field_opt("Customer", display_of(&ticket.customer));
    message.field_opt("Partner", display_of(&ticket.partner));
    message.field_opt("Zone", display_of(&ticket.zone));
    message.field_opt("Summary", ticket.summary.as_deref());

    if let Some(detail_id) = ticket.detail.as_ref().and_then(|d| d.id.as_deref()) {
        message.link(
            "Open ticket",
            &format!("{dashboard_base_url}/tickets/details/{detail_id}"),
        );
    }
    message.build()
}

/// Render a subscription event for the given category.
pub fn render_subscription_event(category: Category, record: &SubscriptionRecord) -> Rendered {
    let title = match category {
        Category::SubscriptionExpired => "⚠️ Subscription expired",
        Category::SubscriptionRenewed => "✅ Subscription renewed",
        Category::SubscriberNew => "🆕 New subscriber",
        other => other.label(),
    };

    let mut message = MessageBuilder::new(title);
    message.field("Subscription", &record.id);
    message.field_opt("Customer", display_of(&record.customer));
    message.field_opt("Plan", display_of(&record.plan));
    message.field_opt("Expiry", record.expiry_date.as_deref());
    message.field_opt("Zone", display_of(&record.zone));
    message.build()
}

/// Wrap free text for operator delivery, escaping it for rich channels.
pub fn render_operator_note(text: &str) -> Rendered {
    Rendered {
        rich: escape_html(text),
        plain: text.to_string(),
    }
}

/// First-run summary: state was seeded, nothing was notified item by item.
pub fn render_started_summary(tickets: usize, subscriptions: usize) -> Rendered {
    let mut message = MessageBuilder::new("👋 Monitoring started");
    message.field("Known tickets", &tickets.to_string());
    message.field("Known subscriptions", &subscriptions.to_string());
    message.plain.push_str("\nFuture changes will be reported.");
    message.rich.push_str("\nFuture changes will be reported.");
    message.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tickets::TicketStatus;

    fn ticket() -> TicketRecord {
        TicketRecord {
            display_id: "TCK-1001".to_string(),
            created_at: None,
            status: Some(TicketStatus::Open),
            summary: Some("Router <down> & offline".to_string()),
            partner: None,
            customer: Some(DisplayRef {
                id: None,
                display_value: Some("A. Customer".to_string()),
            }),
            detail: Some(DisplayRef {
                id: Some("9f2".to_string()),
                display_value: Some("Outage".to_string()),
            }),
            zone: None,
        }
    }

    #[test]
    fn rich_rendering_escapes_entities() {
        let rendered = render_new_ticket(&ticket(), "https://admin.example.net");
        assert!(rendered.rich.contains("Router &lt;down&gt; &amp; offline"));
        assert!(rendered.plain.contains("Router <down> & offline"));
    }

    #[test]
    fn deep_link_uses_internal_id() {
        let rendered = render_new_ticket(&ticket(), "https://admin.example.net");
        assert!(rendered
            .rich
            .contains("https://admin.example.net/tickets/details/9f2"));
        assert!(rendered
            .plain
            .contains("https://admin.example.net/tickets/details/9f2"));
    }

    #[test]
    fn missing_detail_id_omits_link() {
        let mut t = ticket();
        t.detail = None;
        let rendered = render_new_ticket(&t, "https://admin.example.net");
        assert!(!rendered.plain.contains("/tickets/details/"));
    }

    #[test]
    fn absent_fields_are_omitted() {
        let mut t = ticket();
        t.summary = None;
        let rendered = render_new_ticket(&t, "https://admin.example.net");
        assert!(!rendered.plain.contains("Summary:"));
        assert!(!rendered.plain.contains("Partner:"));
        assert!(rendered.plain.contains("Customer: A. Customer"));
    }

    #[test]
    fn subscription_titles_follow_category() {
        let record = SubscriptionRecord {
            id: "s-1".to_string(),
            status: Some("Expired".to_string()),
            customer: None,
            plan: None,
            expiry_date: Some("2026-08-01".to_string()),
            zone: None,
        };
        let rendered = render_subscription_event(Category::SubscriptionExpired, &record);
        assert!(rendered.plain.starts_with("⚠️ Subscription expired"));
        assert!(rendered.plain.contains("Expiry: 2026-08-01"));

        let rendered = render_subscription_event(Category::SubscriptionRenewed, &record);
        assert!(rendered.plain.starts_with("✅ Subscription renewed"));
    }

    #[test]
    fn started_summary_reports_counts() {
        let rendered = render_started_summary(12, 240);
        assert!(rendered.plain.contains("Known tickets: 12"));
        assert!(rendered.plain.contains("Known subscriptions: 240"));
    }
}
