//! Session file persistence.
//!
//! One file, one writer per run, whole-file atomic replacement. A corrupt
//! or missing file degrades to "no session" so the manager falls back to a
//! credential login instead of failing the run.

use std::path::Path;

use tracing::info;

use crate::storage::{self, StorageError};

use super::types::AuthSession;

pub fn load_session(path: &Path) -> Result<Option<AuthSession>, StorageError> {
    let session: Option<AuthSession> = storage::read_json(path)?;
    if let Some(session) = &session {
        info!(
            event = "core.auth.session_loaded",
            saved_at = %session.saved_at,
            has_access_token = session.access_token.is_some(),
            has_refresh_token = session.refresh_token.is_some(),
        );
    }
    Ok(session)
}

pub fn save_session(path: &Path, session: &AuthSession) -> Result<(), StorageError> {
    storage::write_json_atomic(path, session)?;
    info!(
        event = "core.auth.session_saved",
        saved_at = %session.saved_at,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let session = AuthSession::new(
            r#"{"cookies":[]}"#.to_string(),
            Some("tok".to_string()),
            None,
        );
        save_session(&path, &session).unwrap();

        let loaded = load_session(&path).unwrap().unwrap();
        assert_eq!(loaded.storage_state, session.storage_state);
        assert_eq!(loaded.access_token.as_deref(), Some("tok"));
        assert!(loaded.refresh_token.is_none());
    }

    #[test]
    fn missing_file_is_no_session() {
        let dir = TempDir::new().unwrap();
        assert!(load_session(&dir.path().join("session.json"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn corrupt_file_is_no_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "garbage").unwrap();
        assert!(load_session(&path).unwrap().is_none());
    }
}
