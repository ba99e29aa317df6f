mod global;
mod monitor;
mod settings;

#[cfg(test)]
mod tests;

use clap::Command;

pub fn build_cli() -> Command {
    global::root_command()
        .subcommand(monitor::run_command())
        .subcommand(monitor::status_command())
        .subcommand(settings::settings_command())
}
