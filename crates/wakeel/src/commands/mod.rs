mod run;
mod settings;
mod status;

use clap::ArgMatches;
use tracing::{error, warn};

use wakeel_config::{Secrets, WakeelConfig, WakeelPaths};
use wakeel_core::settings::RemoteSettingsStore;
use wakeel_core::SettingsHandle;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("run", sub_matches)) => run::handle_run_command(sub_matches),
        Some(("status", sub_matches)) => status::handle_status_command(sub_matches),
        Some(("settings", sub_matches)) => settings::handle_settings_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

/// Load configuration with a warning on errors.
///
/// Falls back to defaults if config loading fails, notifying the user on
/// stderr and via a structured log event.
pub(crate) fn load_config_with_warning() -> WakeelConfig {
    match WakeelConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.wakeel/config.toml and ./.wakeel/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            WakeelConfig::default()
        }
    }
}

/// Build the settings handle, attaching the remote store when both the
/// sync section and its token are configured.
pub(crate) fn build_settings_handle(
    config: &WakeelConfig,
    secrets: Option<&Secrets>,
    paths: WakeelPaths,
) -> SettingsHandle {
    let token = match secrets {
        Some(secrets) => secrets.settings_sync_token.clone(),
        None => std::env::var(wakeel_config::secrets::ENV_SETTINGS_SYNC_TOKEN)
            .ok()
            .filter(|v| !v.trim().is_empty()),
    };

    let remote = match (&config.settings_sync, token) {
        (Some(sync), Some(token)) => Some(RemoteSettingsStore::new(sync.clone(), token)),
        (Some(_), None) => {
            warn!(
                event = "cli.settings.remote_token_missing",
                "settings_sync configured but no token in the environment, using local copy only"
            );
            None
        }
        _ => None,
    };

    SettingsHandle::new(paths, remote)
}
