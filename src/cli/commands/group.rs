//! Character group CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::Cell;
use serde::Serialize;
use uuid::Uuid;

use crate::cli::commands::open_control;
use crate::cli::id_resolver::{resolve_character_group, resolve_item_list};
use crate::cli::output::{output, table, ActionOutput, CommandOutput};
use crate::domain::models::{CharacterGroup, Config, Configuration};

#[derive(Args, Debug)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommands,
}

#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// Show all character groups
    Show,
    /// Create a new group
    Create { name: String },
    /// Rename a group
    Rename { group: String, name: String },
    /// Delete a group no character is assigned to
    Delete { group: String },
    /// Assign an item list to a group
    AddList { group: String, list: String },
    /// Unassign an item list from a group
    RemoveList { group: String, list: String },
}

#[derive(Debug, Serialize)]
pub struct GroupOutput {
    pub id: Uuid,
    pub name: String,
    pub item_lists: Vec<String>,
    pub members: Vec<String>,
}

impl GroupOutput {
    fn new(configuration: &Configuration, group: &CharacterGroup) -> Self {
        Self {
            id: group.id,
            name: group.name.clone(),
            item_lists: group
                .item_list_ids
                .iter()
                .map(|id| {
                    configuration
                        .find_item_list(*id)
                        .map_or_else(|| format!("<missing {id}>"), |l| l.name.clone())
                })
                .collect(),
            members: configuration
                .group_members(group.id)
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GroupListOutput {
    pub groups: Vec<GroupOutput>,
}

impl CommandOutput for GroupListOutput {
    fn to_human(&self) -> String {
        if self.groups.is_empty() {
            return "No character groups.".to_string();
        }
        let mut table = table(&["ID", "Name", "Item lists", "Members"]);
        for group in &self.groups {
            table.add_row(vec![
                Cell::new(&group.id.to_string()[..8]),
                Cell::new(&group.name),
                Cell::new(group.item_lists.join("\n")),
                Cell::new(group.members.join("\n")),
            ]);
        }
        table.to_string()
    }
}

pub async fn execute(args: GroupArgs, config: &Config, json_mode: bool) -> Result<()> {
    let control = open_control(config, false).await?;
    let configuration = control.configuration().await;

    match args.command {
        GroupCommands::Show => {
            let out = GroupListOutput {
                groups: configuration
                    .character_groups
                    .iter()
                    .map(|g| GroupOutput::new(&configuration, g))
                    .collect(),
            };
            output(&out, json_mode);
        }

        GroupCommands::Create { name } => {
            let id = control.edit(|c| c.create_character_group(&name)).await?;
            output(&ActionOutput::ok(format!("Created group '{}' ({id})", name.trim())), json_mode);
        }

        GroupCommands::Rename { group, name } => {
            let id = resolve_character_group(&configuration, &group)?;
            control.edit(|c| c.rename_character_group(id, &name)).await?;
            output(&ActionOutput::ok(format!("Renamed group '{group}' to '{}'", name.trim())), json_mode);
        }

        GroupCommands::Delete { group } => {
            let id = resolve_character_group(&configuration, &group)?;
            let removed = control.edit(|c| c.delete_character_group(id)).await?;
            output(&ActionOutput::ok(format!("Deleted group '{}'", removed.name)), json_mode);
        }

        GroupCommands::AddList { group, list } => {
            let group_id = resolve_character_group(&configuration, &group)?;
            let list_id = resolve_item_list(&configuration, &list)?;
            control
                .edit(|c| c.add_item_list_to_group(group_id, list_id))
                .await?;
            output(&ActionOutput::ok(format!("Group '{group}' now works list '{list}'")), json_mode);
        }

        GroupCommands::RemoveList { group, list } => {
            let group_id = resolve_character_group(&configuration, &group)?;
            let list_id = resolve_item_list(&configuration, &list)?;
            control
                .edit(|c| c.remove_item_list_from_group(group_id, list_id))
                .await?;
            output(&ActionOutput::ok(format!("Removed list '{list}' from group '{group}'")), json_mode);
        }
    }

    Ok(())
}
