//! Command-line interface for `arc`.

pub mod commands;
pub mod id_resolver;
pub mod output;

use clap::{Parser, Subcommand};

use commands::character::CharacterArgs;
use commands::config::ConfigArgs;
use commands::group::GroupArgs;
use commands::list::ListArgs;
use commands::locked_items::LockedItemsArgs;
use commands::sync::SyncArgs;
use commands::venture::NextVentureArgs;

/// Retainer venture planner
#[derive(Parser, Debug)]
#[command(name = "arc", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import character and retainer facts from the snapshot
    Sync(SyncArgs),
    /// Choose (and record) the next venture for a retainer
    NextVenture(NextVentureArgs),
    /// Manage item lists
    List(ListArgs),
    /// Manage character groups
    Group(GroupArgs),
    /// Manage characters and retainers
    Character(CharacterArgs),
    /// Report gatherable items characters still have to unlock
    LockedItems(LockedItemsArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

/// Print a command error and exit with a failure status
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
