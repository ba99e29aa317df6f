//! Notification settings with a remote authoritative copy.
//!
//! The settings file lives in two places: a remote store (GitHub contents
//! API on a private repo, so the interactive toggle bot and the scheduled
//! runs see the same truth) and a local fallback copy. Reads go remote
//! first and fall back to local; writes go local first and push remote
//! best-effort. Settings are read fresh at dispatch time, never cached
//! across runs.

pub mod errors;
pub mod remote;
pub mod store;
pub mod types;

pub use errors::SettingsError;
pub use remote::RemoteSettingsStore;
pub use types::{Category, NotificationSettings};

use tracing::{info, warn};
use wakeel_config::WakeelPaths;

/// Where the effective settings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSource {
    Remote,
    LocalFallback,
    Defaults,
}

/// Explicit handle passed into the dispatcher — settings are never ambient
/// state.
pub struct SettingsHandle {
    paths: WakeelPaths,
    remote: Option<RemoteSettingsStore>,
}

impl SettingsHandle {
    pub fn new(paths: WakeelPaths, remote: Option<RemoteSettingsStore>) -> Self {
        Self { paths, remote }
    }

    /// Load the effective settings: remote authoritative, local fallback,
    /// defaults (everything enabled) as the last resort.
    pub async fn load(&self) -> (NotificationSettings, SettingsSource) {
        if let Some(remote) = &self.remote {
            match remote.fetch().await {
                Ok(settings) => {
                    info!(event = "core.settings.loaded_remote");
                    return (settings, SettingsSource::Remote);
                }
                Err(e) => {
                    warn!(
                        event = "core.settings.remote_fetch_failed",
                        error = %e,
                        "Falling back to local settings copy"
                    );
                }
            }
        }

        match store::load_local(&self.paths.settings_file()) {
            Ok(Some(settings)) => (settings, SettingsSource::LocalFallback),
            Ok(None) => (NotificationSettings::default(), SettingsSource::Defaults),
            Err(e) => {
                warn!(event = "core.settings.local_load_failed", error = %e);
                (NotificationSettings::default(), SettingsSource::Defaults)
            }
        }
    }

    /// Toggle one category: save locally, then best-effort push to the
    /// remote store. Returns whether the remote copy was updated.
    pub async fn set(&self, category: Category, enabled: bool) -> Result<bool, SettingsError> {
        let (mut settings, _) = self.load().await;
        settings.set(category, enabled);

        store::save_local(&self.paths.settings_file(), &settings)?;

        let synced = match &self.remote {
            Some(remote) => match remote.push(&settings).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(
                        event = "core.settings.remote_push_failed",
                        error = %e,
                        "Settings saved locally only"
                    );
                    false
                }
            },
            None => false,
        };

        info!(
            event = "core.settings.category_updated",
            category = category.key(),
            enabled = enabled,
            synced = synced,
        );
        Ok(synced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn no_remote_no_local_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let handle = SettingsHandle::new(WakeelPaths::at(dir.path()), None);

        let (settings, source) = handle.load().await;
        assert_eq!(source, SettingsSource::Defaults);
        assert!(settings.is_enabled(Category::TicketCreated));
    }

    #[tokio::test]
    async fn local_copy_is_used_without_remote() {
        let dir = TempDir::new().unwrap();
        let paths = WakeelPaths::at(dir.path());

        let mut settings = NotificationSettings::default();
        settings.set(Category::SubscriptionExpired, false);
        store::save_local(&paths.settings_file(), &settings).unwrap();

        let handle = SettingsHandle::new(paths, None);
        let (loaded, source) = handle.load().await;
        assert_eq!(source, SettingsSource::LocalFallback);
        assert!(!loaded.is_enabled(Category::SubscriptionExpired));
        assert!(loaded.is_enabled(Category::TicketCreated));
    }

    #[tokio::test]
    async fn set_persists_locally_and_reports_unsynced_without_remote() {
        let dir = TempDir::new().unwrap();
        let handle = SettingsHandle::new(WakeelPaths::at(dir.path()), None);

        let synced = handle.set(Category::SubscriberNew, false).await.unwrap();
        assert!(!synced);

        let (loaded, _) = handle.load().await;
        assert!(!loaded.is_enabled(Category::SubscriberNew));
    }
}
