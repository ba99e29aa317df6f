//! Stdio JSONL driver client.
//!
//! Spawns the configured driver command (a sidecar owning the actual
//! headless browser) and implements [`BrowserSurface`] by exchanging one
//! request/response line pair per call. Calls are serialized through a
//! mutex; the engine is strictly sequential anyway, the mutex just makes
//! that a type-level fact.

use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::BufReader;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::errors::BrowserError;
use super::protocol::{self, DriverErrorKind, DriverRequest, DriverResponse};
use super::traits::{BrowserSurface, WaitPolicy};

/// Grace added on top of the driver-enforced timeout before the engine
/// gives up on a hung driver process.
const DRIVER_GRACE: Duration = Duration::from_secs(10);

/// Default deadline for operations without an explicit timeout parameter.
const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(30);

struct DriverIo {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

pub struct StdioDriver {
    io: Mutex<DriverIo>,
    next_id: AtomicU64,
}

impl StdioDriver {
    /// Spawn the driver command and take ownership of its stdio.
    pub fn spawn(command: &[String]) -> Result<Self, BrowserError> {
        let (program, args) = command.split_first().ok_or_else(|| BrowserError::DriverFailed {
            message: "driver command is empty".to_string(),
        })?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::DriverFailed {
                message: format!("failed to spawn '{}': {}", program, e),
            })?;

        let stdin = child.stdin.take().ok_or_else(|| BrowserError::DriverFailed {
            message: "driver stdin unavailable".to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| BrowserError::DriverFailed {
            message: "driver stdout unavailable".to_string(),
        })?;

        info!(event = "core.browser.driver_spawned", program = program);

        Ok(Self {
            io: Mutex::new(DriverIo {
                child,
                stdin,
                stdout: BufReader::new(stdout),
            }),
            next_id: AtomicU64::new(1),
        })
    }

    fn request_id(&self) -> String {
        format!("req-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Send one request and wait for its response within `deadline`.
    async fn request(
        &self,
        req: DriverRequest,
        deadline: Duration,
    ) -> Result<Option<Value>, BrowserError> {
        let mut io = self.io.lock().await;

        let exchange = async {
            protocol::write_message(&mut io.stdin, &req).await?;
            match protocol::read_message::<_, DriverResponse>(&mut io.stdout).await? {
                Some(response) => Ok(response),
                None => Err(BrowserError::DriverFailed {
                    message: "driver closed its stdout".to_string(),
                }),
            }
        };

        let response = tokio::time::timeout(deadline, exchange)
            .await
            .map_err(|_| BrowserError::Timeout {
                operation: "driver_exchange".to_string(),
                timeout_secs: deadline.as_secs(),
            })??;

        match response {
            DriverResponse::Ok { result, .. } => Ok(result),
            DriverResponse::Error { kind, message, .. } => Err(map_driver_error(kind, message)),
        }
    }

    /// Ask the driver to shut down cleanly, then reap the process.
    pub async fn shutdown(self) {
        let id = self.request_id();
        let mut io = self.io.lock().await;
        if let Err(e) = protocol::write_message(&mut io.stdin, &DriverRequest::Shutdown { id }).await
        {
            warn!(event = "core.browser.driver_shutdown_write_failed", error = %e);
        }
        match tokio::time::timeout(Duration::from_secs(5), io.child.wait()).await {
            Ok(Ok(status)) => {
                info!(event = "core.browser.driver_exited", status = %status);
            }
            Ok(Err(e)) => {
                warn!(event = "core.browser.driver_wait_failed", error = %e);
            }
            Err(_) => {
                warn!(event = "core.browser.driver_shutdown_timeout");
                if let Err(e) = io.child.start_kill() {
                    warn!(event = "core.browser.driver_kill_failed", error = %e);
                }
            }
        }
    }
}

fn map_driver_error(kind: DriverErrorKind, message: String) -> BrowserError {
    match kind {
        DriverErrorKind::Timeout => BrowserError::Timeout {
            operation: message,
            timeout_secs: 0,
        },
        DriverErrorKind::Navigation => BrowserError::NavigationFailed {
            url: String::new(),
            message,
        },
        DriverErrorKind::Selector => BrowserError::SelectorFailed {
            selector: String::new(),
            message,
        },
        DriverErrorKind::Script => BrowserError::ScriptFailed { message },
        DriverErrorKind::Internal => BrowserError::DriverFailed { message },
    }
}

#[async_trait]
impl BrowserSurface for StdioDriver {
    async fn navigate(
        &self,
        url: &str,
        wait: WaitPolicy,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        self.request(
            DriverRequest::Navigate {
                id: self.request_id(),
                url: url.to_string(),
                wait,
                timeout_ms: timeout.as_millis() as u64,
            },
            timeout + DRIVER_GRACE,
        )
        .await
        .map(|_| ())
    }

    async fn evaluate_script(&self, js: &str) -> Result<Value, BrowserError> {
        self.request(
            DriverRequest::Evaluate {
                id: self.request_id(),
                js: js.to_string(),
            },
            DEFAULT_OP_TIMEOUT,
        )
        .await
        .map(|result| result.unwrap_or(Value::Null))
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<(), BrowserError> {
        self.request(
            DriverRequest::Fill {
                id: self.request_id(),
                selector: selector.to_string(),
                value: value.to_string(),
            },
            DEFAULT_OP_TIMEOUT,
        )
        .await
        .map(|_| ())
    }

    async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        self.request(
            DriverRequest::Click {
                id: self.request_id(),
                selector: selector.to_string(),
            },
            DEFAULT_OP_TIMEOUT,
        )
        .await
        .map(|_| ())
    }

    async fn wait_for_url_pattern(
        &self,
        pattern: &str,
        timeout: Duration,
    ) -> Result<String, BrowserError> {
        let result = self
            .request(
                DriverRequest::WaitForUrl {
                    id: self.request_id(),
                    pattern: pattern.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                },
                timeout + DRIVER_GRACE,
            )
            .await?;

        result
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| BrowserError::ProtocolError {
                message: "wait_for_url returned no URL".to_string(),
            })
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        let result = self
            .request(
                DriverRequest::CurrentUrl {
                    id: self.request_id(),
                },
                DEFAULT_OP_TIMEOUT,
            )
            .await?;

        result
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| BrowserError::ProtocolError {
                message: "current_url returned no URL".to_string(),
            })
    }

    async fn read_persisted_state(&self) -> Result<String, BrowserError> {
        let result = self
            .request(
                DriverRequest::ReadState {
                    id: self.request_id(),
                },
                DEFAULT_OP_TIMEOUT,
            )
            .await?;

        result
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| BrowserError::ProtocolError {
                message: "read_state returned no blob".to_string(),
            })
    }

    async fn write_persisted_state(&self, blob: &str) -> Result<(), BrowserError> {
        self.request(
            DriverRequest::WriteState {
                id: self.request_id(),
                blob: blob.to_string(),
            },
            DEFAULT_OP_TIMEOUT,
        )
        .await
        .map(|_| ())
    }
}
