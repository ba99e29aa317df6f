//! Ticket wire types.
//!
//! Shapes follow the dashboard's ticket API: identity and timestamps at the
//! top level, descriptive attributes as nested `{id, displayValue}`
//! objects. Unknown fields are ignored; everything used only for display is
//! optional so one malformed attribute never drops a ticket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A nested descriptive reference as the API renders it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    #[serde(rename = "In Progress", alias = "In progress", alias = "InProgress")]
    InProgress,
    Resolved,
    Closed,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
            TicketStatus::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    /// Stable, globally unique per account. The identity used for
    /// change detection.
    pub display_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<TicketStatus>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub partner: Option<DisplayRef>,
    #[serde(default)]
    pub customer: Option<DisplayRef>,
    /// The ticket's own `{id, displayValue}` entry; carries the internal id
    /// used in deep links and the request-type label.
    #[serde(default, rename = "self")]
    pub detail: Option<DisplayRef>,
    #[serde(default)]
    pub zone: Option<DisplayRef>,
}

impl TicketRecord {
    /// Parse an API item, returning `None` (with a warning) when the item
    /// has no usable identity.
    pub fn from_api_item(item: &serde_json::Value) -> Option<Self> {
        match serde_json::from_value::<Self>(item.clone()) {
            Ok(record) if !record.display_id.is_empty() => Some(record),
            Ok(_) => {
                tracing::warn!(
                    event = "core.tickets.item_missing_identity",
                    message = "Ticket item has empty displayId, skipping"
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    event = "core.tickets.item_parse_failed",
                    error = %e,
                    message = "Ticket item failed to parse, skipping"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_api_item() {
        let item = json!({
            "displayId": "TCK-1001",
            "createdAt": "2026-08-20T10:15:00Z",
            "status": "In progress",
            "summary": "No signal since morning",
            "partner": { "id": "42", "displayValue": "North Agent" },
            "customer": { "displayValue": "A. Customer" },
            "self": { "id": "9f2", "displayValue": "Outage" },
            "zone": { "displayValue": "Sector 7" }
        });

        let record = TicketRecord::from_api_item(&item).unwrap();
        assert_eq!(record.display_id, "TCK-1001");
        assert_eq!(record.status, Some(TicketStatus::InProgress));
        assert_eq!(
            record.zone.as_ref().and_then(|z| z.display_value.as_deref()),
            Some("Sector 7")
        );
        assert_eq!(record.detail.as_ref().and_then(|d| d.id.as_deref()), Some("9f2"));
    }

    #[test]
    fn item_without_display_id_is_skipped() {
        assert!(TicketRecord::from_api_item(&json!({ "createdAt": "2026-08-20T10:15:00Z" })).is_none());
        assert!(TicketRecord::from_api_item(&json!({ "displayId": "" })).is_none());
    }

    #[test]
    fn unknown_status_string_does_not_fail_parse() {
        let item = json!({ "displayId": "TCK-1", "status": "Escalated" });
        let record = TicketRecord::from_api_item(&item).unwrap();
        assert_eq!(record.status, Some(TicketStatus::Unknown));
    }

    #[test]
    fn minimal_item_parses() {
        let record = TicketRecord::from_api_item(&json!({ "displayId": "TCK-2" })).unwrap();
        assert!(record.created_at.is_none());
        assert!(record.summary.is_none());
    }
}
