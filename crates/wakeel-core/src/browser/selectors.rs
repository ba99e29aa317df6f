//! Ordered fallback selector strategies.
//!
//! Site markup changes between deployments, so every form interaction is
//! specified as an ordered list of candidate selectors. Candidates are tried
//! in order; the first success wins; exhaustion aggregates every attempted
//! selector into one terminal error.

use tracing::{debug, warn};

use super::errors::BrowserError;
use super::traits::BrowserSurface;

/// Fill the first candidate selector that accepts the value.
pub async fn fill_first(
    browser: &dyn BrowserSurface,
    action: &str,
    candidates: &[&str],
    value: &str,
) -> Result<String, BrowserError> {
    for selector in candidates {
        match browser.fill_field(selector, value).await {
            Ok(()) => {
                debug!(
                    event = "core.browser.selector_matched",
                    action = action,
                    selector = selector,
                );
                return Ok((*selector).to_string());
            }
            Err(e) => {
                debug!(
                    event = "core.browser.selector_attempt_failed",
                    action = action,
                    selector = selector,
                    error = %e,
                );
            }
        }
    }

    warn!(
        event = "core.browser.selectors_exhausted",
        action = action,
        attempted = candidates.len(),
    );
    Err(BrowserError::SelectorsExhausted {
        action: action.to_string(),
        attempted: candidates.iter().map(|s| s.to_string()).collect(),
    })
}

/// Click the first candidate selector that resolves.
pub async fn click_first(
    browser: &dyn BrowserSurface,
    action: &str,
    candidates: &[&str],
) -> Result<String, BrowserError> {
    for selector in candidates {
        match browser.click(selector).await {
            Ok(()) => {
                debug!(
                    event = "core.browser.selector_matched",
                    action = action,
                    selector = selector,
                );
                return Ok((*selector).to_string());
            }
            Err(e) => {
                debug!(
                    event = "core.browser.selector_attempt_failed",
                    action = action,
                    selector = selector,
                    error = %e,
                );
            }
        }
    }

    warn!(
        event = "core.browser.selectors_exhausted",
        action = action,
        attempted = candidates.len(),
    );
    Err(BrowserError::SelectorsExhausted {
        action: action.to_string(),
        attempted: candidates.iter().map(|s| s.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::traits::WaitPolicy;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Mock surface that accepts a single selector and records attempts.
    struct SelectorMock {
        accepts: &'static str,
        attempts: Mutex<Vec<String>>,
    }

    impl SelectorMock {
        fn new(accepts: &'static str) -> Self {
            Self {
                accepts,
                attempts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BrowserSurface for SelectorMock {
        async fn navigate(
            &self,
            _url: &str,
            _wait: WaitPolicy,
            _timeout: Duration,
        ) -> Result<(), BrowserError> {
            Ok(())
        }

        async fn evaluate_script(&self, _js: &str) -> Result<Value, BrowserError> {
            Ok(Value::Null)
        }

        async fn fill_field(&self, selector: &str, _value: &str) -> Result<(), BrowserError> {
            self.attempts.lock().unwrap().push(selector.to_string());
            if selector == self.accepts {
                Ok(())
            } else {
                Err(BrowserError::SelectorFailed {
                    selector: selector.to_string(),
                    message: "not found".to_string(),
                })
            }
        }

        async fn click(&self, selector: &str) -> Result<(), BrowserError> {
            self.fill_field(selector, "").await
        }

        async fn wait_for_url_pattern(
            &self,
            pattern: &str,
            _timeout: Duration,
        ) -> Result<String, BrowserError> {
            Ok(pattern.to_string())
        }

        async fn current_url(&self) -> Result<String, BrowserError> {
            Ok("about:blank".to_string())
        }

        async fn read_persisted_state(&self) -> Result<String, BrowserError> {
            Ok("{}".to_string())
        }

        async fn write_persisted_state(&self, _blob: &str) -> Result<(), BrowserError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn first_matching_selector_wins() {
        let mock = SelectorMock::new("#second");
        let chosen = fill_first(&mock, "username", &["#first", "#second", "#third"], "x")
            .await
            .unwrap();
        assert_eq!(chosen, "#second");
        // #third never attempted
        assert_eq!(
            *mock.attempts.lock().unwrap(),
            vec!["#first".to_string(), "#second".to_string()]
        );
    }

    #[tokio::test]
    async fn exhaustion_reports_every_attempt() {
        let mock = SelectorMock::new("#nope");
        let err = click_first(&mock, "submit", &["#a", "#b"]).await.unwrap_err();
        match err {
            BrowserError::SelectorsExhausted { action, attempted } => {
                assert_eq!(action, "submit");
                assert_eq!(attempted, vec!["#a".to_string(), "#b".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
