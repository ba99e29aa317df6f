//! Secrets loaded from the environment.
//!
//! Credentials and API tokens are never read from config files — only from
//! environment variables, so config files can be committed and shared.

use crate::errors::ConfigError;

/// Environment variable names, in one place.
pub const ENV_TELEGRAM_TOKEN: &str = "WAKEEL_TELEGRAM_TOKEN";
pub const ENV_BUSINESS_TOKEN: &str = "WAKEEL_BUSINESS_TOKEN";
pub const ENV_DASHBOARD_USERNAME: &str = "WAKEEL_DASHBOARD_USERNAME";
pub const ENV_DASHBOARD_PASSWORD: &str = "WAKEEL_DASHBOARD_PASSWORD";
pub const ENV_SETTINGS_SYNC_TOKEN: &str = "WAKEEL_SETTINGS_SYNC_TOKEN";

#[derive(Clone)]
pub struct Secrets {
    pub telegram_token: String,
    pub business_token: Option<String>,
    pub dashboard_username: String,
    pub dashboard_password: String,
    pub settings_sync_token: Option<String>,
}

// Manual Debug so tokens never end up in logs or panic messages.
impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("telegram_token", &"<redacted>")
            .field("business_token", &self.business_token.as_ref().map(|_| "<redacted>"))
            .field("dashboard_username", &self.dashboard_username)
            .field("dashboard_password", &"<redacted>")
            .field(
                "settings_sync_token",
                &self.settings_sync_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Secrets {
    /// Load all secrets from the environment.
    ///
    /// Required: telegram token, dashboard username and password.
    /// Optional: business channel token, settings sync token.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            telegram_token: require(ENV_TELEGRAM_TOKEN)?,
            business_token: optional(ENV_BUSINESS_TOKEN),
            dashboard_username: require(ENV_DASHBOARD_USERNAME)?,
            dashboard_password: require(ENV_DASHBOARD_PASSWORD)?,
            settings_sync_token: optional(ENV_SETTINGS_SYNC_TOKEN),
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingSecret {
            name: name.to_string(),
        }),
    }
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_tokens() {
        let secrets = Secrets {
            telegram_token: "123:abc".to_string(),
            business_token: Some("xyz".to_string()),
            dashboard_username: "operator".to_string(),
            dashboard_password: "hunter2".to_string(),
            settings_sync_token: None,
        };
        let rendered = format!("{:?}", secrets);
        assert!(!rendered.contains("123:abc"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("xyz"));
        assert!(rendered.contains("operator"));
    }
}
