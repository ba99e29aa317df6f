use chrono::DateTime;
use clap::ArgMatches;
use tracing::{error, info};

use wakeel_config::WakeelPaths;
use wakeel_core::{KnownTicketsState, SubscriptionState};

pub fn handle_status_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.status_started", json_output = json_output);

    let paths = WakeelPaths::resolve()?;
    let tickets = match KnownTicketsState::load(&paths.known_tickets_file()) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to read ticket state: {}", e);
            error!(event = "cli.status_failed", error = %e);
            return Err(e.into());
        }
    };
    let subscriptions = match SubscriptionState::load(&paths.subscriptions_file()) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to read subscription state: {}", e);
            error!(event = "cli.status_failed", error = %e);
            return Err(e.into());
        }
    };

    let last_run = tickets
        .last_run()
        .and_then(|epoch| DateTime::from_timestamp(epoch, 0))
        .map(|dt| dt.to_rfc3339());

    if json_output {
        let status = serde_json::json!({
            "state_dir": paths.root(),
            "known_tickets": tickets.len(),
            "known_subscriptions": subscriptions.len(),
            "last_run": last_run,
            "first_run_pending": tickets.is_first_run(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("📊 Wakeel monitor state");
        println!("   State dir:     {}", paths.root().display());
        println!("   Known tickets: {}", tickets.len());
        println!("   Subscriptions: {}", subscriptions.len());
        match last_run {
            Some(last_run) => println!("   Last run:      {}", last_run),
            None => println!("   Last run:      never (next run seeds state)"),
        }
    }

    info!(
        event = "cli.status_completed",
        known_tickets = tickets.len(),
        known_subscriptions = subscriptions.len(),
    );

    Ok(())
}
