//! JSONL protocol between the engine and the browser driver sidecar.
//!
//! Requests and responses are single JSON lines with `"op"` as the tag
//! field. Every request carries an `id` echoed by the matching response.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::errors::BrowserError;
use super::traits::WaitPolicy;

/// Engine -> Driver request messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum DriverRequest {
    #[serde(rename = "navigate")]
    Navigate {
        id: String,
        url: String,
        wait: WaitPolicy,
        timeout_ms: u64,
    },

    #[serde(rename = "evaluate")]
    Evaluate { id: String, js: String },

    #[serde(rename = "fill")]
    Fill {
        id: String,
        selector: String,
        value: String,
    },

    #[serde(rename = "click")]
    Click { id: String, selector: String },

    #[serde(rename = "wait_for_url")]
    WaitForUrl {
        id: String,
        pattern: String,
        timeout_ms: u64,
    },

    #[serde(rename = "current_url")]
    CurrentUrl { id: String },

    #[serde(rename = "read_state")]
    ReadState { id: String },

    #[serde(rename = "write_state")]
    WriteState { id: String, blob: String },

    #[serde(rename = "shutdown")]
    Shutdown { id: String },
}

/// Driver -> Engine response messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum DriverResponse {
    #[serde(rename = "ok")]
    Ok {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<Value>,
    },

    #[serde(rename = "error")]
    Error {
        id: String,
        kind: DriverErrorKind,
        message: String,
    },
}

/// Failure classification reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverErrorKind {
    Timeout,
    Navigation,
    Selector,
    Script,
    Internal,
}

/// Read a single JSONL message from an async buffered reader.
///
/// Returns `Ok(None)` when the stream is closed (EOF).
pub async fn read_message<R, T>(reader: &mut R) -> Result<Option<T>, BrowserError>
where
    R: AsyncBufRead + Unpin,
    T: DeserializeOwned,
{
    let mut line = String::new();
    let bytes_read = reader.read_line(&mut line).await?;
    if bytes_read == 0 {
        return Ok(None); // EOF
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let msg: T = serde_json::from_str(trimmed).map_err(|e| BrowserError::ProtocolError {
        message: format!("invalid JSON: {}: {}", e, trimmed),
    })?;
    Ok(Some(msg))
}

/// Write a single JSONL message to an async writer.
pub async fn write_message<W, T>(writer: &mut W, msg: &T) -> Result<(), BrowserError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let json = serde_json::to_string(msg).map_err(|e| BrowserError::ProtocolError {
        message: e.to_string(),
    })?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
