//! Name and short ID resolution for CLI arguments.
//!
//! Lists and groups can be named by their (case-insensitive) name or by any
//! unique prefix of their UUID, similar to git short hashes. Characters are
//! named by name or content id; list entries by 1-based position or UUID
//! prefix.

use anyhow::{bail, Result};
use uuid::Uuid;

use crate::domain::models::{Character, Configuration, ItemList};

/// Resolve a character name or content id (decimal, or hex with `0x`).
pub fn resolve_character<'a>(configuration: &'a Configuration, query: &str) -> Result<&'a Character> {
    if let Some(character) = configuration.find_character_by_name(query) {
        return Ok(character);
    }
    let id = match query.strip_prefix("0x").or_else(|| query.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => query.parse().ok(),
    };
    match id.and_then(|id| configuration.find_character(id)) {
        Some(character) => Ok(character),
        None => bail!("No character matches '{query}'. Run 'arc sync' to import characters."),
    }
}

/// Resolve an item list name or ID prefix.
pub fn resolve_item_list(configuration: &Configuration, query: &str) -> Result<Uuid> {
    if let Some(list) = configuration.find_item_list_by_name(query) {
        return Ok(list.id);
    }
    resolve_prefix(configuration.item_lists.iter().map(|l| l.id), query, "item list")
}

/// Resolve a character group name or ID prefix.
pub fn resolve_character_group(configuration: &Configuration, query: &str) -> Result<Uuid> {
    if let Some(group) = configuration.find_character_group_by_name(query) {
        return Ok(group.id);
    }
    resolve_prefix(
        configuration.character_groups.iter().map(|g| g.id),
        query,
        "character group",
    )
}

/// Resolve a list entry by 1-based position or internal ID prefix.
pub fn resolve_queued_item(list: &ItemList, query: &str) -> Result<Uuid> {
    if let Ok(position) = query.parse::<usize>() {
        return match position.checked_sub(1).and_then(|i| list.items.get(i)) {
            Some(item) => Ok(item.internal_id),
            None => bail!(
                "List '{}' has {} entries, no entry #{position}",
                list.name,
                list.items.len()
            ),
        };
    }
    resolve_prefix(list.items.iter().map(|i| i.internal_id), query, "list entry")
}

fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        bail!("ID prefix must not be empty");
    }
    if !prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
        bail!("Nothing named '{prefix}' and it is not an ID prefix");
    }
    Ok(())
}

fn resolve_prefix(ids: impl Iterator<Item = Uuid>, prefix: &str, entity: &str) -> Result<Uuid> {
    validate_prefix(prefix)?;
    let needle = prefix.to_ascii_lowercase();
    let matches: Vec<Uuid> = ids
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("No {entity} found matching '{prefix}'"),
        _ => bail!(
            "Ambiguous {entity} prefix '{prefix}' matches {} entries; use a longer prefix",
            matches.len()
        ),
    }
}
