use clap::{Arg, ArgAction, Command};

pub fn settings_command() -> Command {
    Command::new("settings")
        .about("Show or change notification settings")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("show")
                .about("Show the effective notification settings")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output settings as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("set")
                .about("Enable or disable a notification category")
                .arg(
                    Arg::new("category")
                        .help("Category key (e.g. ticket_created)")
                        .required(true),
                )
                .arg(
                    Arg::new("state")
                        .help("on or off")
                        .value_parser(["on", "off"])
                        .required(true),
                ),
        )
}
