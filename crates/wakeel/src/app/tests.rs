use super::build_cli;

#[test]
fn run_subcommand_parses() {
    let matches = build_cli().try_get_matches_from(["wakeel", "run"]).unwrap();
    assert_eq!(matches.subcommand_name(), Some("run"));
}

#[test]
fn verbose_is_global() {
    let matches = build_cli()
        .try_get_matches_from(["wakeel", "run", "--verbose"])
        .unwrap();
    assert!(matches.get_flag("verbose"));
}

#[test]
fn status_accepts_json_flag() {
    let matches = build_cli()
        .try_get_matches_from(["wakeel", "status", "--json"])
        .unwrap();
    let (_, sub) = matches.subcommand().unwrap();
    assert!(sub.get_flag("json"));
}

#[test]
fn settings_set_requires_category_and_state() {
    assert!(build_cli()
        .try_get_matches_from(["wakeel", "settings", "set"])
        .is_err());
    assert!(build_cli()
        .try_get_matches_from(["wakeel", "settings", "set", "ticket_created"])
        .is_err());

    let matches = build_cli()
        .try_get_matches_from(["wakeel", "settings", "set", "ticket_created", "off"])
        .unwrap();
    let (_, settings) = matches.subcommand().unwrap();
    let (name, set) = settings.subcommand().unwrap();
    assert_eq!(name, "set");
    assert_eq!(set.get_one::<String>("category").unwrap(), "ticket_created");
    assert_eq!(set.get_one::<String>("state").unwrap(), "off");
}

#[test]
fn settings_set_rejects_bad_state() {
    assert!(build_cli()
        .try_get_matches_from(["wakeel", "settings", "set", "ticket_created", "maybe"])
        .is_err());
}

#[test]
fn bare_invocation_requires_a_subcommand() {
    assert!(build_cli().try_get_matches_from(["wakeel"]).is_err());
}
