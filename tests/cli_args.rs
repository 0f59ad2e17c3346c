//! CLI argument parsing tests.

use clap::Parser;
use huntress::cli::{Cli, Command, Entity};

#[test]
fn test_cli_parses_account_subcommand() {
    let cli = Cli::parse_from(["huntress", "account"]);
    assert!(!cli.json);
    assert!(matches!(cli.command, Command::Account));
}

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["huntress", "get", "agent", "17"]);

    match cli.command {
        Command::Get { entity, id } => {
            assert_eq!(entity, Entity::Agent);
            assert_eq!(id, 17);
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_get_requires_numeric_id() {
    assert!(Cli::try_parse_from(["huntress", "get", "incident", "abc"]).is_err());
}

#[test]
fn test_entity_aliases() {
    for (alias, expected) in [
        ("orgs", Entity::Organization),
        ("agents", Entity::Agent),
        ("incident-reports", Entity::Incident),
        ("reports", Entity::Report),
        ("billing", Entity::BillingReport),
    ] {
        let cli = Cli::parse_from(["huntress", "list", alias]);
        match cli.command {
            Command::List { entity, .. } => assert_eq!(entity, expected, "alias {alias}"),
            _ => panic!("Expected List command"),
        }
    }
}

#[test]
fn test_global_json_flag() {
    let cli = Cli::parse_from(["huntress", "--json", "list", "agents"]);
    assert!(cli.json);

    let cli = Cli::parse_from(["huntress", "list", "agents", "--json"]);
    assert!(cli.json);
}

#[test]
fn test_list_pagination_and_filter_args() {
    let cli = Cli::parse_from([
        "huntress",
        "list",
        "incidents",
        "--page",
        "2",
        "--limit",
        "50",
        "--organization",
        "12",
    ]);

    match cli.command {
        Command::List {
            page,
            limit,
            organization,
            ..
        } => {
            assert_eq!(page, Some(2));
            assert_eq!(limit, Some(50));
            assert_eq!(organization, Some(12));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_timeout_flag() {
    let cli = Cli::parse_from(["huntress", "--timeout", "15", "account"]);
    assert_eq!(cli.timeout, Some(15));
}
