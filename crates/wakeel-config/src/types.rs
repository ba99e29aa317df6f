//! Configuration types for the wakeel monitor.
//!
//! Every field carries a serde default so a partial config file (or no file
//! at all) yields a fully usable configuration. Secrets are never part of
//! these types — see [`crate::secrets`].

use serde::{Deserialize, Serialize};

/// Top-level configuration, merged from defaults, user, and project files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WakeelConfig {
    pub dashboard: DashboardConfig,
    pub monitor: MonitorConfig,
    pub notify: NotifyConfig,
    pub driver: DriverConfig,
    pub settings_sync: Option<SettingsSyncConfig>,
}

/// Remote operator dashboard endpoints and interaction timeouts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Base URL of the dashboard, no trailing slash.
    pub base_url: String,
    /// Host fragment that identifies the SSO/login domain. Landing on a URL
    /// containing this fragment means the restored session is expired.
    pub sso_host: String,
    /// Path of the paged ticket collection endpoint.
    pub tickets_endpoint: String,
    /// Path of the paged subscription collection endpoint.
    pub subscriptions_endpoint: String,
    /// Requested page size for collection fetches.
    pub page_size: u32,
    /// Timeout for dashboard navigations, in seconds.
    pub navigation_timeout_secs: u64,
    /// Timeout for each login form field interaction, in seconds.
    pub login_field_timeout_secs: u64,
    /// Timeout for the post-login wait until the dashboard URL is reached,
    /// in seconds.
    pub dashboard_wait_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "https://admin.example.net".to_string(),
            sso_host: "sso.".to_string(),
            tickets_endpoint: "/api/support/tickets".to_string(),
            subscriptions_endpoint: "/api/subscriptions".to_string(),
            page_size: 30,
            navigation_timeout_secs: 120,
            login_field_timeout_secs: 5,
            dashboard_wait_timeout_secs: 90,
        }
    }
}

/// An inclusive millisecond delay range sampled uniformly per wait.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

/// An inclusive delay range in whole seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SecondsRange {
    pub min_secs: u64,
    pub max_secs: u64,
}

/// Polling cadence and anti-flood thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Minimum spacing between two runs, in seconds. Runs triggered earlier
    /// than this are skipped entirely.
    pub min_run_interval_secs: u64,
    /// Tickets older than this are recorded as known but never notified.
    pub max_ticket_age_hours: u64,
    /// Randomized delay between collection pages.
    pub inter_page_delay: DelayRange,
    /// Randomized delay between outbound per-item notifications.
    pub inter_message_delay: DelayRange,
    /// Randomized startup delay window applied when the run is triggered by
    /// a shared scheduler (`WAKEEL_SCHEDULED=1`).
    pub startup_jitter_secs: SecondsRange,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            min_run_interval_secs: 300,
            max_ticket_age_hours: 24,
            inter_page_delay: DelayRange {
                min_ms: 1_000,
                max_ms: 3_000,
            },
            inter_message_delay: DelayRange {
                min_ms: 1_000,
                max_ms: 3_000,
            },
            startup_jitter_secs: SecondsRange {
                min_secs: 30,
                max_secs: 360,
            },
        }
    }
}

/// Notification audiences and channel endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NotifyConfig {
    pub telegram: TelegramConfig,
    pub business: Option<BusinessChannelConfig>,
}

/// Telegram Bot API destinations. The token comes from the environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TelegramConfig {
    pub api_base: String,
    /// Account owner. Always notified for business events.
    pub owner_chat_id: String,
    /// Secondary business audience, gated by per-category settings.
    pub group_chat_id: Option<String>,
    /// Operator/developer audience for system-health messages.
    pub operator_chat_id: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            owner_chat_id: String::new(),
            group_chat_id: None,
            operator_chat_id: String::new(),
        }
    }
}

/// Session-window-constrained business messaging API (plain-text payloads).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BusinessChannelConfig {
    pub api_base: String,
    /// Destination identifier for the secondary business audience.
    pub destination: String,
}

/// Browser driver sidecar process.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Command line used to spawn the driver (argv form, first element is
    /// the executable). The driver speaks JSONL on stdin/stdout.
    pub command: Vec<String>,
}

/// Remote authoritative copy of the notification settings file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsSyncConfig {
    pub api_base: String,
    /// `owner/repo` of the private repository holding the settings file.
    pub repo: String,
    /// Path of the settings file inside the repository.
    pub path: String,
}

impl Default for SettingsSyncConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            repo: String::new(),
            path: "settings.json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_cadence() {
        let config = WakeelConfig::default();
        assert_eq!(config.monitor.min_run_interval_secs, 300);
        assert_eq!(config.monitor.max_ticket_age_hours, 24);
        assert_eq!(config.dashboard.page_size, 30);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: WakeelConfig =
            toml::from_str("[monitor]\nmin_run_interval_secs = 600\n").unwrap();
        assert_eq!(config.monitor.min_run_interval_secs, 600);
        assert_eq!(config.monitor.max_ticket_age_hours, 24);
        assert_eq!(config.dashboard.tickets_endpoint, "/api/support/tickets");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<WakeelConfig, _> = toml::from_str("[monitor]\nbogus = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn startup_jitter_is_configured_in_seconds() {
        let config: WakeelConfig = toml::from_str(
            "[monitor.startup_jitter_secs]\nmin_secs = 5\nmax_secs = 20\n",
        )
        .unwrap();
        assert_eq!(config.monitor.startup_jitter_secs.min_secs, 5);
        assert_eq!(config.monitor.startup_jitter_secs.max_secs, 20);

        // Millisecond field names do not belong on the seconds range.
        let result: Result<WakeelConfig, _> =
            toml::from_str("[monitor.startup_jitter_secs]\nmin_ms = 5\nmax_ms = 20\n");
        assert!(result.is_err());
    }
}
