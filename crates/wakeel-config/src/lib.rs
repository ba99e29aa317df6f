//! # wakeel-config
//!
//! TOML configuration types, loading, validation, secrets, and path
//! resolution for the wakeel monitor.
//!
//! Single source of truth for `WakeelConfig` and `WakeelPaths`. Depends on
//! nothing else in the workspace.

mod loading;
mod validation;

pub mod errors;
pub mod paths;
pub mod secrets;
pub mod types;

pub use errors::ConfigError;
pub use loading::load_hierarchy;
pub use paths::WakeelPaths;
pub use secrets::Secrets;
pub use types::{
    BusinessChannelConfig, DashboardConfig, DelayRange, DriverConfig, MonitorConfig, NotifyConfig,
    SecondsRange, SettingsSyncConfig, TelegramConfig, WakeelConfig,
};
pub use validation::validate_config;

impl WakeelConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }
}
