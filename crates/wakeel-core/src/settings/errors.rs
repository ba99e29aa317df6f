use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Remote settings request failed: {source}")]
    RemoteRequest {
        #[from]
        source: reqwest::Error,
    },

    #[error("Remote settings store returned HTTP {status}")]
    RemoteStatus { status: u16 },

    #[error("Remote settings payload invalid: {message}")]
    RemotePayload { message: String },

    #[error("Settings persistence failed: {source}")]
    Storage {
        #[from]
        source: StorageError,
    },
}

impl crate::errors::WakeelError for SettingsError {
    fn error_code(&self) -> &'static str {
        match self {
            SettingsError::RemoteRequest { .. } => "SETTINGS_REMOTE_REQUEST_FAILED",
            SettingsError::RemoteStatus { .. } => "SETTINGS_REMOTE_STATUS",
            SettingsError::RemotePayload { .. } => "SETTINGS_REMOTE_PAYLOAD",
            SettingsError::Storage { .. } => "SETTINGS_STORAGE_ERROR",
        }
    }

    fn is_operational(&self) -> bool {
        matches!(
            self,
            SettingsError::RemoteRequest { .. } | SettingsError::RemoteStatus { .. }
        )
    }
}
