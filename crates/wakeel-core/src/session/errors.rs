use crate::browser::BrowserError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Credential login failed. The run must abort without touching
    /// business state; only the operator audience hears about it.
    #[error("Authentication failed: {message}")]
    Fatal { message: String },

    #[error("Browser operation failed: {source}")]
    Browser {
        #[from]
        source: BrowserError,
    },

    #[error("Session persistence failed: {source}")]
    Storage {
        #[from]
        source: StorageError,
    },
}

impl crate::errors::WakeelError for AuthError {
    fn error_code(&self) -> &'static str {
        match self {
            AuthError::Fatal { .. } => "AUTH_FATAL",
            AuthError::Browser { .. } => "AUTH_BROWSER_ERROR",
            AuthError::Storage { .. } => "AUTH_STORAGE_ERROR",
        }
    }

    fn is_operational(&self) -> bool {
        matches!(self, AuthError::Fatal { .. })
    }
}
