//! Telegram Bot API channel.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use wakeel_config::TelegramConfig;

use crate::notify::errors::NotifyError;
use crate::notify::traits::{NotificationChannel, TextStyle};

const CHANNEL_NAME: &str = "telegram";

pub struct TelegramChannel {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramChannel {
    pub fn new(config: &TelegramConfig, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.clone(),
            token,
        }
    }
}

#[async_trait]
impl NotificationChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        CHANNEL_NAME
    }

    fn style(&self) -> TextStyle {
        TextStyle::Rich
    }

    async fn send(&self, destination: &str, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let body = json!({
            "chat_id": destination,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|source| NotifyError::Request {
                channel: CHANNEL_NAME,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status {
                channel: CHANNEL_NAME,
                status: status.as_u16(),
            });
        }

        let parsed: SendMessageResponse =
            response.json().await.map_err(|source| NotifyError::Request {
                channel: CHANNEL_NAME,
                source,
            })?;
        if !parsed.ok {
            return Err(NotifyError::Rejected {
                channel: CHANNEL_NAME,
                message: parsed.description.unwrap_or_else(|| "no description".to_string()),
            });
        }

        debug!(event = "core.notify.telegram_sent", chat_id = destination);
        Ok(())
    }
}
