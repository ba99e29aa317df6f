//! Session-window-constrained business messaging channel.
//!
//! Plain-text only. Delivery is accepted by the API even outside the
//! recipient's session window, but silently dropped, so this channel is
//! never the sole audience for anything important.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;
use wakeel_config::BusinessChannelConfig;

use crate::notify::errors::NotifyError;
use crate::notify::traits::{NotificationChannel, TextStyle};

const CHANNEL_NAME: &str = "business";

pub struct BusinessChannel {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

impl BusinessChannel {
    pub fn new(config: &BusinessChannelConfig, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.clone(),
            token,
        }
    }
}

#[async_trait]
impl NotificationChannel for BusinessChannel {
    fn name(&self) -> &'static str {
        CHANNEL_NAME
    }

    fn style(&self) -> TextStyle {
        TextStyle::Plain
    }

    async fn send(&self, destination: &str, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/messages", self.api_base);
        let body = json!({
            "to": destination,
            "type": "text",
            "text": { "body": text },
        });

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
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

        debug!(event = "core.notify.business_sent", destination = destination);
        Ok(())
    }
}
