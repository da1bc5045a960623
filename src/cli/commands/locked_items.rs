//! Locked-items report CLI command.

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color};
use serde::Serialize;

use crate::cli::commands::open_control;
use crate::cli::output::{output, supports_color, table, CommandOutput};
use crate::domain::models::Config;
use crate::services::{locked_items_report, CharacterLockedItems, UnlockState};

#[derive(Args, Debug)]
pub struct LockedItemsArgs {
    /// Only list items that still need unlocking
    #[arg(long)]
    pub only_missing: bool,
}

#[derive(Debug, Serialize)]
pub struct LockedItemsOutput {
    pub characters: Vec<CharacterLockedItems>,
}

fn state_cell(state: UnlockState) -> Cell {
    let cell = Cell::new(state.as_str());
    if !supports_color() {
        return cell;
    }
    match state {
        UnlockState::Unlocked => cell.fg(Color::Green),
        UnlockState::Locked => cell.fg(Color::Red),
        UnlockState::NotApplicable => cell.fg(Color::DarkGrey),
    }
}

impl CommandOutput for LockedItemsOutput {
    fn to_human(&self) -> String {
        if self.characters.is_empty() {
            return "No gatherable items on any managed character's lists.".to_string();
        }
        let mut table = table(&["Character", "Item", "Status"]);
        for character in &self.characters {
            for item in &character.items {
                table.add_row(vec![
                    Cell::new(&character.character),
                    Cell::new(&item.name),
                    state_cell(item.state),
                ]);
            }
        }
        table.to_string()
    }
}

pub async fn execute(args: LockedItemsArgs, config: &Config, json_mode: bool) -> Result<()> {
    let control = open_control(config, true).await?;
    let configuration = control.configuration().await;
    let only_missing =
        args.only_missing || configuration.config_ui_options.only_show_missing_gathered_items;

    let out = LockedItemsOutput {
        characters: locked_items_report(&configuration, control.catalog(), only_missing),
    };
    output(&out, json_mode);
    Ok(())
}
