//! Path resolution for wakeel's config and state files.
//!
//! Everything lives under `~/.wakeel/` unless overridden with the
//! `WAKEEL_HOME` environment variable (used by tests and containerized
//! deployments where the home directory is not writable).

use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

#[derive(Debug, Clone)]
pub struct WakeelPaths {
    root: PathBuf,
}

impl WakeelPaths {
    /// Resolve the wakeel home directory.
    pub fn resolve() -> Result<Self, ConfigError> {
        if let Ok(home) = std::env::var("WAKEEL_HOME") {
            if !home.is_empty() {
                return Ok(Self {
                    root: PathBuf::from(home),
                });
            }
        }

        dirs::home_dir()
            .map(|home| Self {
                root: home.join(".wakeel"),
            })
            .ok_or(ConfigError::HomeDirNotFound)
    }

    /// Construct paths rooted at an explicit directory (tests).
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `~/.wakeel/config.toml` — user configuration.
    pub fn user_config(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// `./.wakeel/config.toml` — project-local configuration overrides.
    pub fn project_config(project_root: &Path) -> PathBuf {
        project_root.join(".wakeel").join("config.toml")
    }

    /// Persisted browser/auth session blob plus cached tokens.
    pub fn session_file(&self) -> PathBuf {
        self.root.join("session.json")
    }

    /// Previously-seen ticket ids and last-run timestamp.
    pub fn known_tickets_file(&self) -> PathBuf {
        self.root.join("known_tickets.json")
    }

    /// Last-observed subscription statuses.
    pub fn subscriptions_file(&self) -> PathBuf {
        self.root.join("subscriptions.json")
    }

    /// Local fallback copy of the notification settings.
    pub fn settings_file(&self) -> PathBuf {
        self.root.join("settings.json")
    }
}
