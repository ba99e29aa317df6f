//! The browser automation surface trait.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::errors::BrowserError;

/// What "navigation finished" means for a given page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitPolicy {
    /// DOM parsed; subresources may still be loading.
    DomContentLoaded,
    /// Full load event fired.
    Load,
    /// No in-flight network requests; lets client-side token refresh run.
    NetworkIdle,
}

/// Interactive browser primitives exposed by the driver collaborator.
///
/// Every call carries an explicit timeout where one applies; a timeout is a
/// terminal failure for that step, never retried in place.
#[async_trait]
pub trait BrowserSurface: Send + Sync {
    /// Navigate the page and wait per `wait`.
    async fn navigate(
        &self,
        url: &str,
        wait: WaitPolicy,
        timeout: Duration,
    ) -> Result<(), BrowserError>;

    /// Evaluate a script in the page context and return its JSON result.
    async fn evaluate_script(&self, js: &str) -> Result<Value, BrowserError>;

    /// Fill a form field identified by a CSS selector.
    async fn fill_field(&self, selector: &str, value: &str) -> Result<(), BrowserError>;

    /// Click an element identified by a CSS selector.
    async fn click(&self, selector: &str) -> Result<(), BrowserError>;

    /// Wait until the page URL contains `pattern`; returns the matched URL.
    async fn wait_for_url_pattern(
        &self,
        pattern: &str,
        timeout: Duration,
    ) -> Result<String, BrowserError>;

    /// Current page URL.
    async fn current_url(&self) -> Result<String, BrowserError>;

    /// Serialized browser storage state (cookies + local storage), opaque.
    async fn read_persisted_state(&self) -> Result<String, BrowserError>;

    /// Restore a previously serialized storage state into the context.
    async fn write_persisted_state(&self, blob: &str) -> Result<(), BrowserError>;
}
