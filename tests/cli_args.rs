//! CLI argument parsing tests.

use clap::Parser;
use dome9::cli::{AzureCommand, Cli, Command, HistoryCommand, TrustCommand};
use dome9::{OperationMode, TrustDirection};

#[test]
fn test_cli_parses_trust_list_default_direction() {
    let cli = Cli::parse_from(["dome9", "trusts", "list"]);

    assert!(!cli.json);
    match cli.command {
        Command::Trusts(TrustCommand::List { direction }) => {
            assert_eq!(direction, TrustDirection::MyAccountIsTarget);
        }
        _ => panic!("Expected trusts list command"),
    }
}

#[test]
fn test_cli_parses_trust_list_source_direction() {
    let cli = Cli::parse_from(["dome9", "trust", "list", "--direction", "source"]);

    match cli.command {
        Command::Trusts(TrustCommand::List { direction }) => {
            assert_eq!(direction, TrustDirection::MyAccountIsSource);
        }
        _ => panic!("Expected trusts list command"),
    }
}

#[test]
fn test_cli_rejects_unknown_direction() {
    let result = Cli::try_parse_from(["dome9", "trusts", "list", "--direction", "sideways"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_trust_delete() {
    let cli = Cli::parse_from(["dome9", "trusts", "delete", "1337-trust"]);

    match cli.command {
        Command::Trusts(TrustCommand::Delete { id }) => assert_eq!(id, "1337-trust"),
        _ => panic!("Expected trusts delete command"),
    }
}

#[test]
fn test_cli_parses_azure_missing_permissions() {
    let cli = Cli::parse_from(["dome9", "azure", "missing-permissions", "acct"]);

    match cli.command {
        Command::Azure(AzureCommand::MissingPermissions {
            id,
            entity_type,
            sub_type,
        }) => {
            assert_eq!(id, "acct");
            assert!(entity_type.is_none());
            assert!(sub_type.is_none());
        }
        _ => panic!("Expected azure missing-permissions command"),
    }
}

#[test]
fn test_cli_parses_azure_missing_permissions_by_entity_type() {
    let cli = Cli::parse_from([
        "dome9",
        "azure",
        "missing-permissions",
        "acct",
        "--entity-type",
        "NetworkSecurityGroup",
        "--sub-type",
        "Write",
    ]);

    match cli.command {
        Command::Azure(AzureCommand::MissingPermissions {
            entity_type,
            sub_type,
            ..
        }) => {
            assert_eq!(entity_type.as_deref(), Some("NetworkSecurityGroup"));
            assert_eq!(sub_type.as_deref(), Some("Write"));
        }
        _ => panic!("Expected azure missing-permissions command"),
    }
}

#[test]
fn test_cli_entity_type_requires_sub_type() {
    let result = Cli::try_parse_from([
        "dome9",
        "azure",
        "missing-permissions",
        "acct",
        "--entity-type",
        "NetworkSecurityGroup",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_azure_mode() {
    let cli = Cli::parse_from(["dome9", "azure", "mode", "acct", "manage"]);

    match cli.command {
        Command::Azure(AzureCommand::Mode { id, mode }) => {
            assert_eq!(id, "acct");
            assert_eq!(mode, OperationMode::Manage);
        }
        _ => panic!("Expected azure mode command"),
    }
}

#[test]
fn test_cli_parses_azure_rename() {
    let cli = Cli::parse_from(["dome9", "azure", "rename", "acct", "Production"]);

    match cli.command {
        Command::Azure(AzureCommand::Rename { id, name }) => {
            assert_eq!(id, "acct");
            assert_eq!(name, "Production");
        }
        _ => panic!("Expected azure rename command"),
    }
}

#[test]
fn test_cli_parses_history_get() {
    let cli = Cli::parse_from(["dome9", "history", "get", "123"]);

    match cli.command {
        Command::History(HistoryCommand::Get { id }) => assert_eq!(id, 123),
        _ => panic!("Expected history get command"),
    }
}

#[test]
fn test_cli_rejects_non_numeric_history_id() {
    let result = Cli::try_parse_from(["dome9", "history", "delete", "abc"]);
    assert!(result.is_err());
}

#[test]
fn test_global_flags() {
    // --json before subcommand
    let cli = Cli::parse_from(["dome9", "--json", "azure", "list"]);
    assert!(cli.json);

    // --json and --verbose after subcommand (global flags)
    let cli = Cli::parse_from(["dome9", "azure", "list", "--json", "-v"]);
    assert!(cli.json);
    assert!(cli.verbose);
}

#[test]
fn test_base_url_flag() {
    let cli = Cli::parse_from([
        "dome9",
        "--base-url",
        "http://localhost:8080/",
        "trusts",
        "roles",
    ]);

    assert_eq!(cli.auth.base_url.as_deref(), Some("http://localhost:8080/"));
    assert!(matches!(cli.command, Command::Trusts(TrustCommand::Roles)));
}
