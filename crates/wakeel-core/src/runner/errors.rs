use crate::fetch::FetchError;
use crate::session::AuthError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Authentication failed: {source}")]
    Auth {
        #[from]
        source: AuthError,
    },

    #[error("Collection fetch failed: {source}")]
    Fetch {
        #[from]
        source: FetchError,
    },

    #[error("State persistence failed: {source}")]
    Storage {
        #[from]
        source: StorageError,
    },
}

impl crate::errors::WakeelError for RunError {
    fn error_code(&self) -> &'static str {
        match self {
            RunError::Auth { .. } => "RUN_AUTH_FAILED",
            RunError::Fetch { .. } => "RUN_FETCH_FAILED",
            RunError::Storage { .. } => "RUN_STORAGE_ERROR",
        }
    }

    fn is_operational(&self) -> bool {
        matches!(self, RunError::Auth { .. } | RunError::Fetch { .. })
    }
}
