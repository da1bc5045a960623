//! Item list CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::Cell;
use serde::Serialize;
use uuid::Uuid;

use crate::cli::commands::{item_label, open_control};
use crate::cli::id_resolver::{resolve_item_list, resolve_queued_item};
use crate::cli::output::{output, table, ActionOutput, CommandOutput};
use crate::domain::models::{Config, Configuration, ItemList, ListPriority, ListType, VentureCatalog};

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(subcommand)]
    pub command: ListCommands,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Show all lists, or the entries of one list
    Show {
        /// List name or ID prefix
        list: Option<String>,
    },
    /// Create a new list
    Create {
        name: String,
        /// one-time or keep-stocked
        #[arg(short = 't', long = "type", value_parser = parse_list_type, default_value = "one-time")]
        list_type: ListType,
        /// in-order or balanced (keep-stocked lists only)
        #[arg(short, long, value_parser = parse_priority, default_value = "in-order")]
        priority: ListPriority,
        /// Count third-party retainer inventory toward stock
        #[arg(long)]
        check_retainer_inventory: bool,
    },
    /// Change a list's name or behaviour
    Set {
        list: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short = 't', long = "type", value_parser = parse_list_type)]
        list_type: Option<ListType>,
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<ListPriority>,
        #[arg(long)]
        check_retainer_inventory: Option<bool>,
    },
    /// Delete a list no character or group uses
    Delete { list: String },
    /// Append an item to a list
    AddItem {
        list: String,
        item_id: u32,
        /// Quantity to collect, or stock level to keep
        quantity: i32,
    },
    /// Remove an entry (1-based position or ID prefix)
    RemoveItem { list: String, entry: String },
    /// Move an entry to a new 1-based position
    MoveItem {
        list: String,
        entry: String,
        position: usize,
    },
    /// Change the quantity of an entry
    SetQuantity {
        list: String,
        entry: String,
        quantity: i32,
    },
}

fn parse_list_type(s: &str) -> Result<ListType, String> {
    ListType::from_str(&s.replace('-', "_"))
        .ok_or_else(|| format!("unknown list type '{s}' (one-time, keep-stocked)"))
}

fn parse_priority(s: &str) -> Result<ListPriority, String> {
    ListPriority::from_str(&s.replace('-', "_"))
        .ok_or_else(|| format!("unknown priority '{s}' (in-order, balanced)"))
}

#[derive(Debug, Serialize)]
pub struct ListSummary {
    pub id: Uuid,
    pub name: String,
    pub list_type: ListType,
    pub priority: ListPriority,
    pub check_retainer_inventory: bool,
    pub entries: usize,
    pub users: usize,
}

#[derive(Debug, Serialize)]
pub struct ListOverviewOutput {
    pub lists: Vec<ListSummary>,
}

impl CommandOutput for ListOverviewOutput {
    fn to_human(&self) -> String {
        if self.lists.is_empty() {
            return "No item lists. Create one with 'arc list create <name>'.".to_string();
        }
        let mut table = table(&["ID", "Name", "Type", "Priority", "Entries", "Used by"]);
        for list in &self.lists {
            table.add_row(vec![
                Cell::new(&list.id.to_string()[..8]),
                Cell::new(&list.name),
                Cell::new(list.list_type.as_str()),
                Cell::new(list.priority.as_str()),
                Cell::new(list.entries),
                Cell::new(list.users),
            ]);
        }
        table.to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct EntryOutput {
    pub position: usize,
    pub internal_id: Uuid,
    pub item_id: u32,
    pub item: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct ListDetailOutput {
    pub list: ListSummary,
    pub items: Vec<EntryOutput>,
}

impl CommandOutput for ListDetailOutput {
    fn to_human(&self) -> String {
        let list = &self.list;
        let mut lines = vec![
            format!("List: {} ({})", list.name, list.id),
            format!("Type: {}", list.list_type.as_str()),
            format!("Priority: {}", list.priority.as_str()),
            format!("Check retainer inventory: {}", list.check_retainer_inventory),
        ];
        if self.items.is_empty() {
            lines.push("No entries.".to_string());
            return lines.join("\n");
        }

        let quantity_header = match list.list_type {
            ListType::CollectOneTime => "Remaining",
            ListType::KeepStocked => "Keep",
        };
        let mut table = table(&["#", "Item", quantity_header, "Entry ID"]);
        for entry in &self.items {
            table.add_row(vec![
                Cell::new(entry.position),
                Cell::new(&entry.item),
                Cell::new(entry.quantity),
                Cell::new(&entry.internal_id.to_string()[..8]),
            ]);
        }
        lines.push(table.to_string());
        lines.join("\n")
    }
}

fn summary(configuration: &Configuration, list: &ItemList) -> ListSummary {
    ListSummary {
        id: list.id,
        name: list.name.clone(),
        list_type: list.list_type,
        priority: list.priority,
        check_retainer_inventory: list.check_retainer_inventory,
        entries: list.items.len(),
        users: configuration.item_list_users(list.id),
    }
}

fn detail(configuration: &Configuration, catalog: &VentureCatalog, list: &ItemList) -> ListDetailOutput {
    ListDetailOutput {
        list: summary(configuration, list),
        items: list
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| EntryOutput {
                position: index + 1,
                internal_id: item.internal_id,
                item_id: item.item_id,
                item: item_label(catalog, item.item_id),
                quantity: item.remaining_quantity,
            })
            .collect(),
    }
}

pub async fn execute(args: ListArgs, config: &Config, json_mode: bool) -> Result<()> {
    let control = open_control(config, false).await?;
    let configuration = control.configuration().await;

    match args.command {
        ListCommands::Show { list: None } => {
            let out = ListOverviewOutput {
                lists: configuration
                    .item_lists
                    .iter()
                    .map(|l| summary(&configuration, l))
                    .collect(),
            };
            output(&out, json_mode);
        }

        ListCommands::Show { list: Some(query) } => {
            let id = resolve_item_list(&configuration, &query)?;
            if let Some(list) = configuration.find_item_list(id) {
                output(&detail(&configuration, control.catalog(), list), json_mode);
            }
        }

        ListCommands::Create {
            name,
            list_type,
            priority,
            check_retainer_inventory,
        } => {
            let id = control
                .edit(|c| c.create_item_list(&name, list_type, priority, check_retainer_inventory))
                .await?;
            output(&ActionOutput::ok(format!("Created list '{}' ({id})", name.trim())), json_mode);
        }

        ListCommands::Set {
            list,
            name,
            list_type,
            priority,
            check_retainer_inventory,
        } => {
            let id = resolve_item_list(&configuration, &list)?;
            let updated = control
                .edit(|c| {
                    let current = c
                        .find_item_list(id)
                        .ok_or(crate::domain::DomainError::ItemListNotFound(id))?
                        .clone();
                    c.update_item_list(
                        id,
                        name.as_deref().unwrap_or(&current.name),
                        list_type.unwrap_or(current.list_type),
                        priority.unwrap_or(current.priority),
                        check_retainer_inventory.unwrap_or(current.check_retainer_inventory),
                    )?;
                    Ok(c.find_item_list(id).cloned())
                })
                .await?;
            if let Some(list) = updated {
                let configuration = control.configuration().await;
                output(&detail(&configuration, control.catalog(), &list), json_mode);
            }
        }

        ListCommands::Delete { list } => {
            let id = resolve_item_list(&configuration, &list)?;
            let removed = control.edit(|c| c.delete_item_list(id)).await?;
            output(&ActionOutput::ok(format!("Deleted list '{}'", removed.name)), json_mode);
        }

        ListCommands::AddItem {
            list,
            item_id,
            quantity,
        } => {
            let id = resolve_item_list(&configuration, &list)?;
            control
                .edit(|c| c.add_queued_item(id, item_id, quantity))
                .await?;
            output(
                &ActionOutput::ok(format!(
                    "Added {quantity}x {} to '{list}'",
                    item_label(control.catalog(), item_id)
                )),
                json_mode,
            );
        }

        ListCommands::RemoveItem { list, entry } => {
            let id = resolve_item_list(&configuration, &list)?;
            let entry_id = entry_id(&configuration, id, &entry)?;
            let removed = control.edit(|c| c.remove_queued_item(id, entry_id)).await?;
            output(
                &ActionOutput::ok(format!(
                    "Removed {} from '{list}'",
                    item_label(control.catalog(), removed.item_id)
                )),
                json_mode,
            );
        }

        ListCommands::MoveItem {
            list,
            entry,
            position,
        } => {
            let id = resolve_item_list(&configuration, &list)?;
            let entry_id = entry_id(&configuration, id, &entry)?;
            control
                .edit(|c| c.move_queued_item(id, entry_id, position.saturating_sub(1)))
                .await?;
            output(&ActionOutput::ok(format!("Moved entry {entry} of '{list}'")), json_mode);
        }

        ListCommands::SetQuantity {
            list,
            entry,
            quantity,
        } => {
            let id = resolve_item_list(&configuration, &list)?;
            let entry_id = entry_id(&configuration, id, &entry)?;
            control
                .edit(|c| c.set_queued_item_quantity(id, entry_id, quantity))
                .await?;
            output(
                &ActionOutput::ok(format!("Set entry {entry} of '{list}' to {quantity}")),
                json_mode,
            );
        }
    }

    Ok(())
}

fn entry_id(configuration: &Configuration, list_id: Uuid, entry: &str) -> Result<Uuid> {
    let list = configuration
        .find_item_list(list_id)
        .ok_or(crate::domain::DomainError::ItemListNotFound(list_id))?;
    resolve_queued_item(list, entry)
}
