//! Character CLI commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use comfy_table::{Cell, Color};
use serde::Serialize;

use crate::cli::commands::open_control;
use crate::cli::id_resolver::{resolve_character, resolve_character_group, resolve_item_list};
use crate::cli::output::{output, supports_color, table, ActionOutput, CommandOutput};
use crate::domain::models::{Character, CharacterType, Config, Configuration, VentureCatalog};

#[derive(Args, Debug)]
pub struct CharacterArgs {
    #[command(subcommand)]
    pub command: CharacterCommands,
}

#[derive(Subcommand, Debug)]
pub enum CharacterCommands {
    /// Show characters and their retainers
    Show {
        /// Character name or content id; all characters when omitted
        character: Option<String>,
    },
    /// Change how a character's retainers are managed
    Mode {
        character: String,
        /// not-managed, standalone or group
        #[arg(value_parser = parse_character_type)]
        mode: CharacterType,
        /// Group name or ID prefix (group mode only)
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Assign an item list to a standalone character
    AddList { character: String, list: String },
    /// Unassign an item list from a character
    RemoveList { character: String, list: String },
    /// Opt a retainer in or out of venture planning
    Manage {
        character: String,
        retainer: String,
        /// Stop managing the retainer instead
        #[arg(long)]
        off: bool,
    },
}

fn parse_character_type(s: &str) -> Result<CharacterType, String> {
    CharacterType::from_str(&s.replace('-', "_"))
        .ok_or_else(|| format!("unknown mode '{s}' (not-managed, standalone, group)"))
}

#[derive(Debug, Serialize)]
pub struct RetainerOutput {
    pub name: String,
    pub managed: bool,
    pub job: String,
    pub level: u32,
    pub item_level: u32,
    pub gathering: u32,
    pub perception: u32,
    pub venture: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CharacterOutput {
    pub local_content_id: u64,
    pub name: String,
    pub mode: CharacterType,
    pub group: Option<String>,
    pub item_lists: Vec<String>,
    pub ventures: u32,
    pub retainers: Vec<RetainerOutput>,
}

impl CharacterOutput {
    fn new(configuration: &Configuration, catalog: &VentureCatalog, character: &Character) -> Self {
        let mut retainers: Vec<_> = character.retainers.iter().collect();
        retainers.sort_by_key(|r| (r.display_order, r.content_id().unwrap_or(0)));

        let group = character
            .character_group_id
            .filter(|_| character.character_type == CharacterType::PartOfCharacterGroup)
            .map(|id| {
                configuration
                    .find_character_group(id)
                    .map_or_else(|| format!("<missing {id}>"), |g| g.name.clone())
            });
        let item_lists = configuration
            .effective_item_lists(character)
            .unwrap_or_default()
            .into_iter()
            .map(|l| l.name.clone())
            .collect();

        Self {
            local_content_id: character.local_content_id,
            name: character.to_string(),
            mode: character.character_type,
            group,
            item_lists,
            ventures: character.ventures,
            retainers: retainers
                .into_iter()
                .map(|r| RetainerOutput {
                    name: r.name.clone(),
                    managed: r.managed,
                    job: job_label(r.job),
                    level: r.level,
                    item_level: r.item_level,
                    gathering: r.gathering,
                    perception: r.perception,
                    venture: (r.has_venture && r.last_venture != 0).then(|| {
                        catalog
                            .venture(r.last_venture)
                            .map_or_else(|| format!("#{}", r.last_venture), |v| v.name.clone())
                    }),
                })
                .collect(),
        }
    }
}

fn job_label(job: u32) -> String {
    crate::domain::models::gathering_category_for_job(job)
        .map_or_else(|| format!("combat ({job})"), |c| c.abbreviation().to_string())
}

#[derive(Debug, Serialize)]
pub struct CharacterListOutput {
    pub characters: Vec<CharacterOutput>,
}

impl CommandOutput for CharacterListOutput {
    fn to_human(&self) -> String {
        if self.characters.is_empty() {
            return "No characters. Run 'arc sync' to import them.".to_string();
        }

        let mut sections = Vec::new();
        for character in &self.characters {
            let mut header = format!(
                "{} [{:X}] mode: {}, ventures: {}",
                character.name, character.local_content_id, character.mode, character.ventures
            );
            if let Some(group) = &character.group {
                header.push_str(&format!(", group: {group}"));
            }
            if !character.item_lists.is_empty() {
                header.push_str(&format!("\n  lists: {}", character.item_lists.join(", ")));
            }

            let mut table = table(&["Retainer", "Managed", "Job", "Lv", "iLv", "Gath", "Perc", "Venture"]);
            for r in &character.retainers {
                let managed = if supports_color() {
                    Cell::new(if r.managed { "yes" } else { "no" })
                        .fg(if r.managed { Color::Green } else { Color::DarkGrey })
                } else {
                    Cell::new(if r.managed { "yes" } else { "no" })
                };
                table.add_row(vec![
                    Cell::new(&r.name),
                    managed,
                    Cell::new(&r.job),
                    Cell::new(r.level),
                    Cell::new(r.item_level),
                    Cell::new(r.gathering),
                    Cell::new(r.perception),
                    Cell::new(r.venture.as_deref().unwrap_or("-")),
                ]);
            }
            sections.push(format!("{header}\n{table}"));
        }
        sections.join("\n\n")
    }
}

pub async fn execute(args: CharacterArgs, config: &Config, json_mode: bool) -> Result<()> {
    let control = open_control(config, false).await?;
    let configuration = control.configuration().await;

    match args.command {
        CharacterCommands::Show { character } => {
            let characters: Vec<&Character> = match character {
                Some(query) => vec![resolve_character(&configuration, &query)?],
                None => configuration.characters.iter().collect(),
            };
            let out = CharacterListOutput {
                characters: characters
                    .into_iter()
                    .map(|c| CharacterOutput::new(&configuration, control.catalog(), c))
                    .collect(),
            };
            output(&out, json_mode);
        }

        CharacterCommands::Mode {
            character,
            mode,
            group,
        } => {
            let target = resolve_character(&configuration, &character)?;
            let group_id = match (mode, group) {
                (CharacterType::PartOfCharacterGroup, Some(group)) => {
                    Some(resolve_character_group(&configuration, &group)?)
                }
                (CharacterType::PartOfCharacterGroup, None) => {
                    bail!("Group mode needs --group <name>")
                }
                (_, _) => None,
            };
            let id = target.local_content_id;
            control
                .edit(|c| c.set_character_type(id, mode, group_id))
                .await?;
            output(&ActionOutput::ok(format!("{target} is now {mode}")), json_mode);
        }

        CharacterCommands::AddList { character, list } => {
            let target = resolve_character(&configuration, &character)?;
            let list_id = resolve_item_list(&configuration, &list)?;
            let id = target.local_content_id;
            control
                .edit(|c| c.add_item_list_to_character(id, list_id))
                .await?;
            let mut message = format!("{target} now works list '{list}'");
            if target.character_type != CharacterType::Standalone {
                message.push_str(" (only used in standalone mode)");
            }
            output(&ActionOutput::ok(message), json_mode);
        }

        CharacterCommands::RemoveList { character, list } => {
            let target = resolve_character(&configuration, &character)?;
            let list_id = resolve_item_list(&configuration, &list)?;
            let id = target.local_content_id;
            control
                .edit(|c| c.remove_item_list_from_character(id, list_id))
                .await?;
            output(&ActionOutput::ok(format!("Removed list '{list}' from {target}")), json_mode);
        }

        CharacterCommands::Manage {
            character,
            retainer,
            off,
        } => {
            let target = resolve_character(&configuration, &character)?;
            let id = target.local_content_id;
            control
                .edit(|c| c.set_retainer_managed(id, &retainer, !off))
                .await?;
            let state = if off { "no longer managed" } else { "managed" };
            output(&ActionOutput::ok(format!("Retainer {retainer} of {target} is {state}")), json_mode);
        }
    }

    Ok(())
}
