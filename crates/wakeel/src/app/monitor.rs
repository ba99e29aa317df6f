use clap::{Arg, ArgAction, Command};

pub fn run_command() -> Command {
    Command::new("run").about("Execute one monitoring run")
}

pub fn status_command() -> Command {
    Command::new("status")
        .about("Show persisted monitor state")
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output status as JSON")
                .action(ArgAction::SetTrue),
        )
}
