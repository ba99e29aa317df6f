//! Shared test doubles.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::browser::{BrowserError, BrowserSurface, WaitPolicy};
use crate::notify::{NotificationChannel, NotifyError, TextStyle};

/// Shared log of `(destination, text)` pairs sent through a
/// [`RecordingChannel`].
pub type SentLog = Arc<Mutex<Vec<(String, String)>>>;

/// In-memory [`NotificationChannel`] that records every send.
pub struct RecordingChannel {
    name: &'static str,
    style: TextStyle,
    fail: bool,
    sent: SentLog,
}

impl RecordingChannel {
    pub fn new(name: &'static str, style: TextStyle) -> (Self, SentLog) {
        let sent: SentLog = Arc::default();
        (
            Self {
                name,
                style,
                fail: false,
                sent: Arc::clone(&sent),
            },
            sent,
        )
    }

    /// A channel whose every send fails with an HTTP 500.
    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            style: TextStyle::Rich,
            fail: true,
            sent: Arc::default(),
        }
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn style(&self) -> TextStyle {
        self.style
    }

    async fn send(&self, destination: &str, text: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Status {
                channel: self.name,
                status: 500,
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((destination.to_string(), text.to_string()));
        Ok(())
    }
}

/// Scriptable in-memory [`BrowserSurface`].
///
/// `evaluate_script` pops queued results in order (empty queue yields
/// `null`); `current_url` pops queued URLs and falls back to a settable
/// default. All interactions are recorded for assertions.
pub struct MockBrowser {
    default_url: Mutex<String>,
    queued_urls: Mutex<VecDeque<String>>,
    eval_results: Mutex<VecDeque<Value>>,
    eval_log: Mutex<Vec<String>>,
    filled: Mutex<Vec<(String, String)>>,
    clicked: Mutex<Vec<String>>,
    navigations: Mutex<Vec<String>>,
    state_blob: Mutex<String>,
    written_state: Mutex<Vec<String>>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self {
            default_url: Mutex::new("https://admin.example.net/dashboard".to_string()),
            queued_urls: Mutex::new(VecDeque::new()),
            eval_results: Mutex::new(VecDeque::new()),
            eval_log: Mutex::new(Vec::new()),
            filled: Mutex::new(Vec::new()),
            clicked: Mutex::new(Vec::new()),
            navigations: Mutex::new(Vec::new()),
            state_blob: Mutex::new("{}".to_string()),
            written_state: Mutex::new(Vec::new()),
        }
    }

    pub fn set_current_url(&self, url: &str) {
        *self.default_url.lock().unwrap() = url.to_string();
    }

    pub fn queue_current_urls(&self, urls: &[&str]) {
        let mut queued = self.queued_urls.lock().unwrap();
        for url in urls {
            queued.push_back((*url).to_string());
        }
    }

    pub fn push_eval(&self, value: Value) {
        self.eval_results.lock().unwrap().push_back(value);
    }

    pub fn filled(&self) -> Vec<(String, String)> {
        self.filled.lock().unwrap().clone()
    }

    pub fn clicked(&self) -> Vec<String> {
        self.clicked.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn eval_log(&self) -> Vec<String> {
        self.eval_log.lock().unwrap().clone()
    }

    pub fn written_state(&self) -> Vec<String> {
        self.written_state.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrowserSurface for MockBrowser {
    async fn navigate(
        &self,
        url: &str,
        _wait: WaitPolicy,
        _timeout: Duration,
    ) -> Result<(), BrowserError> {
        self.navigations.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn evaluate_script(&self, js: &str) -> Result<Value, BrowserError> {
        self.eval_log.lock().unwrap().push(js.to_string());
        Ok(self
            .eval_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Value::Null))
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<(), BrowserError> {
        self.filled
            .lock()
            .unwrap()
            .push((selector.to_string(), value.to_string()));
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        self.clicked.lock().unwrap().push(selector.to_string());
        Ok(())
    }

    async fn wait_for_url_pattern(
        &self,
        pattern: &str,
        _timeout: Duration,
    ) -> Result<String, BrowserError> {
        Ok(pattern.to_string())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        if let Some(url) = self.queued_urls.lock().unwrap().pop_front() {
            return Ok(url);
        }
        Ok(self.default_url.lock().unwrap().clone())
    }

    async fn read_persisted_state(&self) -> Result<String, BrowserError> {
        Ok(self.state_blob.lock().unwrap().clone())
    }

    async fn write_persisted_state(&self, blob: &str) -> Result<(), BrowserError> {
        self.written_state.lock().unwrap().push(blob.to_string());
        Ok(())
    }
}
