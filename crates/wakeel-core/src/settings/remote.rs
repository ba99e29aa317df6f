//! Remote settings store over the GitHub contents API.
//!
//! The settings file lives in a private repository so the interactive
//! toggle bot and the scheduled engine share one authoritative copy.
//! Updates send the blob sha of the version being replaced so a
//! concurrent edit fails loudly instead of being overwritten.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use wakeel_config::SettingsSyncConfig;

use super::errors::SettingsError;
use super::types::NotificationSettings;

const USER_AGENT: &str = concat!("wakeel/", env!("CARGO_PKG_VERSION"));

pub struct RemoteSettingsStore {
    client: reqwest::Client,
    config: SettingsSyncConfig,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

impl RemoteSettingsStore {
    pub fn new(config: SettingsSyncConfig, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            token,
        }
    }

    fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.config.api_base, self.config.repo, self.config.path
        )
    }

    async fn get_contents(&self) -> Result<Option<ContentsResponse>, SettingsError> {
        let response = self
            .client
            .get(self.contents_url())
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SettingsError::RemoteStatus {
                status: status.as_u16(),
            });
        }

        Ok(Some(response.json::<ContentsResponse>().await?))
    }

    /// Fetch the authoritative settings document.
    pub async fn fetch(&self) -> Result<NotificationSettings, SettingsError> {
        let contents = self
            .get_contents()
            .await?
            .ok_or_else(|| SettingsError::RemotePayload {
                message: format!("{} not found in {}", self.config.path, self.config.repo),
            })?;

        // The contents API wraps base64 at 60 columns.
        let cleaned: String = contents
            .content
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let raw = BASE64
            .decode(cleaned)
            .map_err(|e| SettingsError::RemotePayload {
                message: format!("content is not valid base64: {e}"),
            })?;

        let settings = serde_json::from_slice(&raw).map_err(|e| SettingsError::RemotePayload {
            message: format!("settings document is not valid JSON: {e}"),
        })?;

        debug!(event = "core.settings.remote_fetched", sha = %contents.sha);
        Ok(settings)
    }

    /// Replace the remote settings document with the given one.
    pub async fn push(&self, settings: &NotificationSettings) -> Result<(), SettingsError> {
        let sha = self.get_contents().await?.map(|c| c.sha);

        let rendered =
            serde_json::to_vec_pretty(settings).map_err(|e| SettingsError::RemotePayload {
                message: format!("settings document failed to serialize: {e}"),
            })?;

        let mut body = json!({
            "message": "Update notification settings",
            "content": BASE64.encode(&rendered),
        });
        if let Some(sha) = &sha {
            body["sha"] = json!(sha);
        }

        let response = self
            .client
            .put(self.contents_url())
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SettingsError::RemoteStatus {
                status: status.as_u16(),
            });
        }

        info!(
            event = "core.settings.remote_pushed",
            repo = %self.config.repo,
            path = %self.config.path,
        );
        Ok(())
    }
}
