//! Notification error types.

use crate::errors::WakeelError;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification request failed on {channel}: {source}")]
    Request {
        channel: &'static str,
        source: reqwest::Error,
    },

    #[error("Notification channel {channel} returned HTTP {status}")]
    Status { channel: &'static str, status: u16 },

    #[error("Notification rejected by {channel}: {message}")]
    Rejected {
        channel: &'static str,
        message: String,
    },
}

impl WakeelError for NotifyError {
    fn error_code(&self) -> &'static str {
        match self {
            NotifyError::Request { .. } => "NOTIFY_REQUEST_FAILED",
            NotifyError::Status { .. } => "NOTIFY_STATUS",
            NotifyError::Rejected { .. } => "NOTIFY_REJECTED",
        }
    }

    fn is_operational(&self) -> bool {
        true
    }
}
