//! Report of gatherable items each character still has to unlock.

use serde::Serialize;

use crate::domain::models::{Character, Configuration, VentureCatalog};

/// Unlock status of one gatherable item for one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockState {
    Unlocked,
    Locked,
    /// None of the character's retainers could venture for the item anyway.
    NotApplicable,
}

impl UnlockState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unlocked => "unlocked",
            Self::Locked => "locked",
            Self::NotApplicable => "n/a",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockedItem {
    pub item_id: u32,
    pub gathered_item_id: u32,
    pub name: String,
    pub state: UnlockState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterLockedItems {
    pub local_content_id: u64,
    pub character: String,
    pub items: Vec<LockedItem>,
}

/// Build the locked-items report for every managed character.
///
/// Only gatherable items that appear on the character's effective lists are
/// reported. With `only_missing`, unlocked items and characters left without
/// entries are dropped.
pub fn locked_items_report(
    configuration: &Configuration,
    catalog: &VentureCatalog,
    only_missing: bool,
) -> Vec<CharacterLockedItems> {
    configuration
        .characters
        .iter()
        .filter(|c| c.is_managed())
        .filter_map(|character| {
            let lists = configuration.effective_item_lists(character)?;

            let mut item_ids: Vec<u32> = Vec::new();
            for item_id in lists.iter().flat_map(|l| l.items.iter().map(|i| i.item_id)) {
                if !item_ids.contains(&item_id) {
                    item_ids.push(item_id);
                }
            }

            let items: Vec<LockedItem> = item_ids
                .into_iter()
                .filter_map(|item_id| catalog.gatherable_item(item_id))
                .map(|gatherable| LockedItem {
                    item_id: gatherable.item_id,
                    gathered_item_id: gatherable.gathered_item_id,
                    name: if gatherable.name.is_empty() {
                        catalog
                            .item_name(gatherable.item_id)
                            .unwrap_or_default()
                            .to_string()
                    } else {
                        gatherable.name.clone()
                    },
                    state: unlock_state(character, catalog, gatherable.item_id, gatherable.gathered_item_id),
                })
                .filter(|item| !only_missing || item.state != UnlockState::Unlocked)
                .collect();

            if only_missing && items.is_empty() {
                return None;
            }
            Some(CharacterLockedItems {
                local_content_id: character.local_content_id,
                character: character.to_string(),
                items,
            })
        })
        .collect()
}

fn unlock_state(
    character: &Character,
    catalog: &VentureCatalog,
    item_id: u32,
    gathered_item_id: u32,
) -> UnlockState {
    let can_fetch = character.retainers.iter().any(|retainer| {
        catalog
            .ventures_for_item(item_id)
            .any(|v| v.category.is_gathering() && v.matches_job(retainer.job))
    });
    if !can_fetch {
        UnlockState::NotApplicable
    } else if character.has_unlocked(gathered_item_id) {
        UnlockState::Unlocked
    } else {
        UnlockState::Locked
    }
}
