//! Subscription wire types and status normalization.

use serde::{Deserialize, Serialize};

use crate::tickets::DisplayRef;

/// Closed status vocabulary used by all transition logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedStatus {
    Active,
    Expired,
    /// Raw string the mapping table doesn't know. Stored verbatim,
    /// excluded from transition reporting in both directions.
    Unrecognized(String),
}

impl NormalizedStatus {
    /// The string persisted in the subscription state file.
    pub fn as_stored(&self) -> &str {
        match self {
            NormalizedStatus::Active => "active",
            NormalizedStatus::Expired => "expired",
            NormalizedStatus::Unrecognized(raw) => raw,
        }
    }
}

/// Map a raw/localized status string into the closed vocabulary.
///
/// The table covers every spelling observed on the dashboard, English and
/// Arabic. Matching is trimmed and ASCII-case-insensitive; Arabic entries
/// are matched verbatim (the dashboard renders them consistently).
pub fn normalize_status(raw: &str) -> NormalizedStatus {
    let trimmed = raw.trim();
    let lowered = trimmed.to_lowercase();
    match lowered.as_str() {
        "active" | "enabled" | "فعال" | "نشط" => NormalizedStatus::Active,
        "expired" | "inactive" | "منتهي" | "منتهية" | "غير فعال" => {
            NormalizedStatus::Expired
        }
        _ => NormalizedStatus::Unrecognized(trimmed.to_string()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    /// Subscription identity.
    pub id: String,
    /// Raw status string as the API reported it.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub customer: Option<DisplayRef>,
    #[serde(default)]
    pub plan: Option<DisplayRef>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub zone: Option<DisplayRef>,
}

impl SubscriptionRecord {
    /// Parse an API item, skipping items without a usable identity.
    pub fn from_api_item(item: &serde_json::Value) -> Option<Self> {
        // The API reports the id as either a string or a number.
        let mut item = item.clone();
        if let Some(id) = item.get("id").and_then(serde_json::Value::as_i64) {
            item["id"] = serde_json::Value::String(id.to_string());
        }

        match serde_json::from_value::<Self>(item) {
            Ok(record) if !record.id.is_empty() => Some(record),
            Ok(_) => {
                tracing::warn!(
                    event = "core.subscriptions.item_missing_identity",
                    message = "Subscription item has empty id, skipping"
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    event = "core.subscriptions.item_parse_failed",
                    error = %e,
                    message = "Subscription item failed to parse, skipping"
                );
                None
            }
        }
    }

    /// Normalized view of the raw status (missing status is unrecognized).
    pub fn normalized_status(&self) -> NormalizedStatus {
        match &self.status {
            Some(raw) => normalize_status(raw),
            None => NormalizedStatus::Unrecognized(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalization_table_covers_known_vocabulary() {
        assert_eq!(normalize_status("Active"), NormalizedStatus::Active);
        assert_eq!(normalize_status("  active "), NormalizedStatus::Active);
        assert_eq!(normalize_status("فعال"), NormalizedStatus::Active);
        assert_eq!(normalize_status("Expired"), NormalizedStatus::Expired);
        assert_eq!(normalize_status("منتهي"), NormalizedStatus::Expired);
        assert_eq!(normalize_status("inactive"), NormalizedStatus::Expired);
    }

    #[test]
    fn unknown_vocabulary_is_unrecognized_verbatim() {
        assert_eq!(
            normalize_status(" Suspended "),
            NormalizedStatus::Unrecognized("Suspended".to_string())
        );
    }

    #[test]
    fn stored_form_is_stable() {
        assert_eq!(NormalizedStatus::Active.as_stored(), "active");
        assert_eq!(NormalizedStatus::Expired.as_stored(), "expired");
        assert_eq!(
            NormalizedStatus::Unrecognized("Suspended".to_string()).as_stored(),
            "Suspended"
        );
    }

    #[test]
    fn parses_api_item_with_numeric_id() {
        let item = json!({
            "id": 7719,
            "status": "Active",
            "customer": { "displayValue": "B. Subscriber" },
            "plan": { "displayValue": "Fiber 100" },
            "expiryDate": "2026-09-30",
            "zone": { "displayValue": "Sector 3" }
        });
        let record = SubscriptionRecord::from_api_item(&item).unwrap();
        assert_eq!(record.id, "7719");
        assert_eq!(record.normalized_status(), NormalizedStatus::Active);
    }

    #[test]
    fn missing_status_is_unrecognized() {
        let record = SubscriptionRecord::from_api_item(&json!({ "id": "s-1" })).unwrap();
        assert!(matches!(
            record.normalized_status(),
            NormalizedStatus::Unrecognized(_)
        ));
    }

    #[test]
    fn item_without_id_is_skipped() {
        assert!(SubscriptionRecord::from_api_item(&json!({ "status": "Active" })).is_none());
    }
}
