//! Shared state-file persistence.
//!
//! Every persisted file is rewritten wholesale: serialize the full document,
//! write it to a sibling `.tmp` file, then rename into place. A process kill
//! can lose the last unwritten increment but never leaves a torn file.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to serialize state: {message}")]
    SerializeFailed { message: String },

    #[error("IO operation failed: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        tracing::warn!(
            event = "core.storage.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
            message = "Failed to clean up temp file after write error"
        );
    }
}

/// Write a document as pretty-printed JSON with a temp-file-and-rename.
///
/// Creates the parent directory if missing.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|e| {
        tracing::error!(
            event = "core.storage.serialization_failed",
            file = %path.display(),
            error = %e,
        );
        StorageError::SerializeFailed {
            message: e.to_string(),
        }
    })?;

    let temp_file = path.with_extension("json.tmp");

    if let Err(e) = fs::write(&temp_file, &json) {
        cleanup_temp_file(&temp_file, &e);
        return Err(StorageError::IoError { source: e });
    }

    if let Err(e) = fs::rename(&temp_file, path) {
        cleanup_temp_file(&temp_file, &e);
        return Err(StorageError::IoError { source: e });
    }

    Ok(())
}

/// Read a JSON document from disk.
///
/// Returns `Ok(None)` when the file does not exist or fails to parse; a
/// corrupt state file is logged and treated as absent so a damaged
/// deployment recovers on the next run instead of wedging.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::IoError { source: e }),
    };

    match serde_json::from_str(&content) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(
                event = "core.storage.load_invalid_json",
                file = %path.display(),
                error = %e,
                message = "State file has invalid JSON, treating as absent"
            );
            Ok(None)
        }
    }
}
