#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Navigation to '{url}' failed: {message}")]
    NavigationFailed { url: String, message: String },

    #[error("Operation '{operation}' timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("Script evaluation failed: {message}")]
    ScriptFailed { message: String },

    #[error("Selector '{selector}' failed: {message}")]
    SelectorFailed { selector: String, message: String },

    #[error("All selectors exhausted for '{action}' (tried: {})", attempted.join(", "))]
    SelectorsExhausted {
        action: String,
        attempted: Vec<String>,
    },

    #[error("Driver process error: {message}")]
    DriverFailed { message: String },

    #[error("Driver protocol error: {message}")]
    ProtocolError { message: String },

    #[error("IO operation failed: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl crate::errors::WakeelError for BrowserError {
    fn error_code(&self) -> &'static str {
        match self {
            BrowserError::NavigationFailed { .. } => "BROWSER_NAVIGATION_FAILED",
            BrowserError::Timeout { .. } => "BROWSER_TIMEOUT",
            BrowserError::ScriptFailed { .. } => "BROWSER_SCRIPT_FAILED",
            BrowserError::SelectorFailed { .. } => "BROWSER_SELECTOR_FAILED",
            BrowserError::SelectorsExhausted { .. } => "BROWSER_SELECTORS_EXHAUSTED",
            BrowserError::DriverFailed { .. } => "BROWSER_DRIVER_FAILED",
            BrowserError::ProtocolError { .. } => "BROWSER_PROTOCOL_ERROR",
            BrowserError::IoError { .. } => "BROWSER_IO_ERROR",
        }
    }

    fn is_operational(&self) -> bool {
        matches!(
            self,
            BrowserError::Timeout { .. } | BrowserError::SelectorsExhausted { .. }
        )
    }
}
