use clap::{Arg, ArgAction, Command};

pub fn root_command() -> Command {
    Command::new("wakeel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Monitor an operator dashboard for new tickets and subscription changes")
        .long_about(
            "Wakeel keeps an authenticated dashboard session alive across runs, fetches the \
             ticket and subscription collections, diffs them against persisted state, and fans \
             out notifications to the configured audiences. Designed to run under a scheduler; \
             a built-in guard skips runs triggered too close together.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
}
