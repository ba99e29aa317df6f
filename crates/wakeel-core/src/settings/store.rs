//! Local fallback settings file.

use std::path::Path;

use crate::storage::{self, StorageError};

use super::types::NotificationSettings;

pub fn load_local(path: &Path) -> Result<Option<NotificationSettings>, StorageError> {
    storage::read_json(path)
}

pub fn save_local(path: &Path, settings: &NotificationSettings) -> Result<(), StorageError> {
    storage::write_json_atomic(path, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::types::Category;
    use tempfile::TempDir;

    #[test]
    fn roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = NotificationSettings::default();
        settings.set(Category::SubscriptionRenewed, false);
        save_local(&path, &settings).unwrap();

        let loaded = load_local(&path).unwrap().unwrap();
        assert!(!loaded.is_enabled(Category::SubscriptionRenewed));
        assert!(loaded.is_enabled(Category::TicketCreated));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_local(&dir.path().join("settings.json")).unwrap().is_none());
    }
}
