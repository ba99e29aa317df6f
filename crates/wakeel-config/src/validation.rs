//! Configuration validation.
//!
//! Runs after merging the full hierarchy, so errors always describe the
//! effective configuration rather than a single file.

use crate::errors::ConfigError;
use crate::types::{DelayRange, SecondsRange, WakeelConfig};

/// Validate the merged configuration.
pub fn validate_config(config: &WakeelConfig) -> Result<(), ConfigError> {
    if config.dashboard.page_size == 0 {
        return Err(invalid("dashboard.page_size must be greater than 0"));
    }

    if config.dashboard.base_url.is_empty() {
        return Err(invalid("dashboard.base_url must not be empty"));
    }

    if config.dashboard.base_url.ends_with('/') {
        return Err(invalid(
            "dashboard.base_url must not have a trailing slash",
        ));
    }

    if config.monitor.min_run_interval_secs == 0 {
        return Err(invalid("monitor.min_run_interval_secs must be greater than 0"));
    }

    validate_range("monitor.inter_page_delay", &config.monitor.inter_page_delay)?;
    validate_range(
        "monitor.inter_message_delay",
        &config.monitor.inter_message_delay,
    )?;
    validate_seconds_range(
        "monitor.startup_jitter_secs",
        &config.monitor.startup_jitter_secs,
    )?;

    if let Some(sync) = &config.settings_sync {
        if sync.repo.is_empty() {
            return Err(invalid("settings_sync.repo must not be empty"));
        }
        if !sync.repo.contains('/') {
            return Err(invalid("settings_sync.repo must be in 'owner/repo' form"));
        }
    }

    Ok(())
}

fn validate_range(name: &str, range: &DelayRange) -> Result<(), ConfigError> {
    if range.min_ms > range.max_ms {
        return Err(invalid(&format!("{}: min_ms must not exceed max_ms", name)));
    }
    Ok(())
}

fn validate_seconds_range(name: &str, range: &SecondsRange) -> Result<(), ConfigError> {
    if range.min_secs > range.max_secs {
        return Err(invalid(&format!(
            "{}: min_secs must not exceed max_secs",
            name
        )));
    }
    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::InvalidConfiguration {
        message: message.to_string(),
    }
}
