//! Tests for the CLI argument structure

use clap::Parser;
use retainer_control::cli::commands::character::CharacterCommands;
use retainer_control::cli::commands::list::ListCommands;
use retainer_control::cli::{Cli, Commands};
use retainer_control::domain::models::{CharacterType, ListPriority, ListType};

#[test]
fn test_help_and_version() {
    let err = Cli::try_parse_from(vec!["arc", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

    let err = Cli::try_parse_from(vec!["arc", "--version"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn test_next_venture_arguments() {
    let cli = Cli::try_parse_from(vec![
        "arc", "next-venture", "Alpha Tester", "-r", "Digger", "--dry-run", "--json",
    ])
    .unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::NextVenture(args) => {
            assert_eq!(args.character, "Alpha Tester");
            assert_eq!(args.retainer.as_deref(), Some("Digger"));
            assert!(args.dry_run);
        }
        other => panic!("Expected next-venture, got {other:?}"),
    }
}

#[test]
fn test_list_create_parses_types() {
    let cli = Cli::try_parse_from(vec![
        "arc", "list", "create", "Fish", "--type", "keep-stocked", "-p", "balanced",
    ])
    .unwrap();

    match cli.command {
        Commands::List(args) => match args.command {
            ListCommands::Create {
                name,
                list_type,
                priority,
                check_retainer_inventory,
            } => {
                assert_eq!(name, "Fish");
                assert_eq!(list_type, ListType::KeepStocked);
                assert_eq!(priority, ListPriority::Balanced);
                assert!(!check_retainer_inventory);
            }
            other => panic!("Expected create, got {other:?}"),
        },
        other => panic!("Expected list, got {other:?}"),
    }

    assert!(Cli::try_parse_from(vec!["arc", "list", "create", "Fish", "--type", "weekly"]).is_err());
}

#[test]
fn test_character_mode_parses_group() {
    let cli = Cli::try_parse_from(vec!["arc", "character", "mode", "Alpha", "group", "-g", "Miners"]).unwrap();

    match cli.command {
        Commands::Character(args) => match args.command {
            CharacterCommands::Mode { mode, group, .. } => {
                assert_eq!(mode, CharacterType::PartOfCharacterGroup);
                assert_eq!(group.as_deref(), Some("Miners"));
            }
            other => panic!("Expected mode, got {other:?}"),
        },
        other => panic!("Expected character, got {other:?}"),
    }
}

#[test]
fn test_unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(vec!["arc", "overmind"]).is_err());
}
