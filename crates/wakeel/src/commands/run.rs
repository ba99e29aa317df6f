use clap::ArgMatches;
use tracing::{error, info};

use wakeel_config::{Secrets, WakeelConfig, WakeelPaths};
use wakeel_core::notify::{Audience, AudienceRole, BusinessChannel, TelegramChannel};
use wakeel_core::runner::apply_startup_jitter;
use wakeel_core::session::LoginCredentials;
use wakeel_core::{
    Dispatcher, FetchClient, NotificationChannel, RunOutcome, Runner, SessionManager, StdioDriver,
};

use super::{build_settings_handle, load_config_with_warning};

pub fn handle_run_command(_matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_warning();
    if let Err(e) = config.validate() {
        eprintln!("❌ Invalid configuration: {}", e);
        error!(event = "cli.run_invalid_config", error = %e);
        return Err(e.into());
    }

    let secrets = match Secrets::from_env() {
        Ok(secrets) => secrets,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("   Hint: export the WAKEEL_* environment variables before running.");
            error!(event = "cli.run_missing_secret", error = %e);
            return Err(e.into());
        }
    };

    if config.driver.command.is_empty() {
        eprintln!("❌ No browser driver configured.");
        eprintln!("   Set [driver] command in ~/.wakeel/config.toml.");
        error!(event = "cli.run_no_driver");
        return Err("No browser driver configured".into());
    }
    if config.notify.telegram.owner_chat_id.is_empty()
        || config.notify.telegram.operator_chat_id.is_empty()
    {
        eprintln!("❌ Telegram chat ids are not configured.");
        eprintln!("   Set [notify.telegram] owner_chat_id and operator_chat_id.");
        error!(event = "cli.run_no_chat_ids");
        return Err("Telegram chat ids are not configured".into());
    }

    let paths = WakeelPaths::resolve()?;

    info!(event = "cli.run_started");

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(execute_run(&config, paths, &secrets))?;

    match outcome {
        RunOutcome::Completed(summary) => {
            if summary.first_run {
                println!("✅ First run: state seeded, no item notifications sent.");
            } else {
                println!("✅ Run completed.");
            }
            println!(
                "   Tickets: {} fetched, {} new, {} notified",
                summary.tickets_fetched, summary.new_tickets, summary.tickets_notified
            );
            println!(
                "   Subscriptions: {} fetched, {} expired, {} renewed, {} new",
                summary.subscriptions_fetched,
                summary.subscriptions_expired,
                summary.subscriptions_renewed,
                summary.subscriptions_added
            );
            info!(
                event = "cli.run_completed",
                first_run = summary.first_run,
                new_tickets = summary.new_tickets,
            );
        }
        RunOutcome::Skipped {
            elapsed_secs,
            min_interval_secs,
            ..
        } => {
            println!(
                "⏭  Run skipped: last run was {}s ago (minimum interval {}s).",
                elapsed_secs, min_interval_secs
            );
            info!(event = "cli.run_skipped", elapsed_secs = elapsed_secs);
        }
    }

    Ok(())
}

async fn execute_run(
    config: &WakeelConfig,
    paths: WakeelPaths,
    secrets: &Secrets,
) -> Result<RunOutcome, Box<dyn std::error::Error>> {
    apply_startup_jitter(&config.monitor).await;

    let driver = match StdioDriver::spawn(&config.driver.command) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("❌ Failed to start browser driver: {}", e);
            error!(event = "cli.run_driver_spawn_failed", error = %e);
            return Err(e.into());
        }
    };

    let session = SessionManager::new(
        paths.session_file(),
        config.dashboard.clone(),
        LoginCredentials {
            username: secrets.dashboard_username.clone(),
            password: secrets.dashboard_password.clone(),
        },
    );
    let fetch = FetchClient::new(config.dashboard.clone(), config.monitor.inter_page_delay);
    let dispatcher = build_dispatcher(config, secrets);
    let settings = build_settings_handle(config, Some(secrets), paths.clone());

    let runner = Runner::new(
        config.clone(),
        paths,
        session,
        fetch,
        dispatcher,
        settings,
    );
    let result = runner.run_once(&driver).await;

    driver.shutdown().await;

    match result {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            eprintln!("❌ Run failed: {}", e);
            error!(event = "cli.run_failed", error = %e);
            Err(e.into())
        }
    }
}

fn build_dispatcher(config: &WakeelConfig, secrets: &Secrets) -> Dispatcher {
    let mut channels: Vec<Box<dyn NotificationChannel>> = vec![Box::new(TelegramChannel::new(
        &config.notify.telegram,
        secrets.telegram_token.clone(),
    ))];

    let mut audiences = vec![Audience {
        role: AudienceRole::Primary,
        channel: "telegram",
        destination: config.notify.telegram.owner_chat_id.clone(),
    }];

    if let Some(group) = &config.notify.telegram.group_chat_id {
        audiences.push(Audience {
            role: AudienceRole::Secondary,
            channel: "telegram",
            destination: group.clone(),
        });
    }

    if let (Some(business), Some(token)) = (&config.notify.business, &secrets.business_token) {
        channels.push(Box::new(BusinessChannel::new(business, token.clone())));
        audiences.push(Audience {
            role: AudienceRole::Secondary,
            channel: "business",
            destination: business.destination.clone(),
        });
    }

    audiences.push(Audience {
        role: AudienceRole::Operator,
        channel: "telegram",
        destination: config.notify.telegram.operator_chat_id.clone(),
    });

    Dispatcher::new(channels, audiences, config.monitor.inter_message_delay)
}
