use clap::ArgMatches;
use tracing::{error, info};

use wakeel_config::WakeelPaths;
use wakeel_core::settings::SettingsSource;
use wakeel_core::Category;

use super::{build_settings_handle, load_config_with_warning};

pub fn handle_settings_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("show", sub_matches)) => handle_show(sub_matches),
        Some(("set", sub_matches)) => handle_set(sub_matches),
        _ => {
            error!(event = "cli.settings_unknown_subcommand");
            Err("Unknown settings subcommand".into())
        }
    }
}

fn handle_show(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.settings_show_started");

    let config = load_config_with_warning();
    let paths = WakeelPaths::resolve()?;
    let handle = build_settings_handle(&config, None, paths);

    let runtime = tokio::runtime::Runtime::new()?;
    let (settings, source) = runtime.block_on(handle.load());

    let source_label = match source {
        SettingsSource::Remote => "remote",
        SettingsSource::LocalFallback => "local",
        SettingsSource::Defaults => "defaults",
    };

    if json_output {
        let mut categories = serde_json::Map::new();
        for category in Category::ALL {
            categories.insert(
                category.key().to_string(),
                serde_json::json!(settings.is_enabled(category)),
            );
        }
        let output = serde_json::json!({
            "source": source_label,
            "categories": categories,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("🔔 Notification settings ({})", source_label);
        for category in Category::ALL {
            let state = if settings.is_enabled(category) { "on" } else { "off" };
            println!("   {:<24} {:<3} ({})", category.label(), state, category.key());
        }
    }

    info!(event = "cli.settings_show_completed", source = source_label);
    Ok(())
}

fn handle_set(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let key = matches
        .get_one::<String>("category")
        .ok_or("Category argument is required")?;
    let state = matches
        .get_one::<String>("state")
        .ok_or("State argument is required")?;
    let enabled = state == "on";

    let Some(category) = Category::from_key(key) else {
        eprintln!("❌ Unknown category '{}'.", key);
        eprintln!("   Valid categories:");
        for category in Category::ALL {
            eprintln!("   {:<24} {}", category.key(), category.label());
        }
        error!(event = "cli.settings_set_unknown_category", category = %key);
        return Err(format!("Unknown category '{}'", key).into());
    };

    info!(
        event = "cli.settings_set_started",
        category = category.key(),
        enabled = enabled,
    );

    let config = load_config_with_warning();
    let paths = WakeelPaths::resolve()?;
    let handle = build_settings_handle(&config, None, paths);

    let runtime = tokio::runtime::Runtime::new()?;
    match runtime.block_on(handle.set(category, enabled)) {
        Ok(synced) => {
            let state = if enabled { "on" } else { "off" };
            if synced {
                println!("✅ {} notifications turned {} (synced to remote).", category.label(), state);
            } else {
                println!("✅ {} notifications turned {} (saved locally).", category.label(), state);
            }
            info!(
                event = "cli.settings_set_completed",
                category = category.key(),
                enabled = enabled,
                synced = synced,
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to update settings: {}", e);
            error!(event = "cli.settings_set_failed", error = %e);
            Err(e.into())
        }
    }
}
