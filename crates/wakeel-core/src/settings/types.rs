//! Notification categories and the settings document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Business notification categories a human can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    TicketCreated,
    SubscriptionExpired,
    SubscriptionRenewed,
    SubscriberNew,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::TicketCreated,
        Category::SubscriptionExpired,
        Category::SubscriptionRenewed,
        Category::SubscriberNew,
    ];

    /// Stable key used in the settings file.
    pub fn key(&self) -> &'static str {
        match self {
            Category::TicketCreated => "ticket_created",
            Category::SubscriptionExpired => "subscription_expired",
            Category::SubscriptionRenewed => "subscription_renewed",
            Category::SubscriberNew => "subscriber_new",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Human label for CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Category::TicketCreated => "New tickets",
            Category::SubscriptionExpired => "Expired subscriptions",
            Category::SubscriptionRenewed => "Renewed subscriptions",
            Category::SubscriberNew => "New subscribers",
        }
    }
}

/// The settings document: category key -> enabled flag.
///
/// Unknown keys found in the file are preserved across writes so an older
/// engine never strips flags a newer toggle UI added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct NotificationSettings {
    values: BTreeMap<String, bool>,
}

impl Default for NotificationSettings {
    /// Every category enabled.
    fn default() -> Self {
        Self {
            values: Category::ALL
                .into_iter()
                .map(|c| (c.key().to_string(), true))
                .collect(),
        }
    }
}

impl NotificationSettings {
    /// Whether a category is enabled. Categories missing from the file
    /// default to enabled — a freshly added category should not be silent
    /// until someone notices.
    pub fn is_enabled(&self, category: Category) -> bool {
        self.values.get(category.key()).copied().unwrap_or(true)
    }

    pub fn set(&mut self, category: Category, enabled: bool) {
        self.values.insert(category.key().to_string(), enabled);
    }
}
