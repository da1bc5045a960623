//! Persisted configuration model.
//!
//! The configuration is an arena of characters, item lists and character
//! groups. Lists and groups are referenced by id only, never embedded, so a
//! list can be shared by several characters and groups. Referential integrity
//! is enforced by the editing operations here: a list or group that is still
//! referenced cannot be deleted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::character::{Character, CharacterType};
use crate::domain::models::character_group::CharacterGroup;
use crate::domain::models::item_list::{ItemList, ListPriority, ListType, QueuedItem};

/// Current configuration schema version.
pub const CONFIGURATION_VERSION: u32 = 2;

/// Upper bound for [`MiscConfiguration::ventures_to_keep`].
pub const MAX_VENTURES_TO_KEEP: u32 = 65_000;

/// Root of the persisted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub item_lists: Vec<ItemList>,
    #[serde(default)]
    pub character_groups: Vec<CharacterGroup>,
    #[serde(default)]
    pub misc: MiscConfiguration,
    #[serde(default)]
    pub config_ui_options: ConfigUiOptions,
}

const fn default_version() -> u32 {
    CONFIGURATION_VERSION
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            version: default_version(),
            characters: Vec::new(),
            item_lists: Vec::new(),
            character_groups: Vec::new(),
            misc: MiscConfiguration::default(),
            config_ui_options: ConfigUiOptions::default(),
        }
    }
}

/// Planner-wide settings edited by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiscConfiguration {
    /// Venture currency reserve; lists are only worked above this amount.
    #[serde(default)]
    pub ventures_to_keep: u32,
}

/// Display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUiOptions {
    #[serde(default = "default_true")]
    pub show_assignment_chat_messages: bool,
    #[serde(default = "default_true")]
    pub show_venture_list_contents: bool,
    #[serde(default)]
    pub check_gathered_items_per_character: bool,
    #[serde(default)]
    pub only_show_missing_gathered_items: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for ConfigUiOptions {
    fn default() -> Self {
        Self {
            show_assignment_chat_messages: true,
            show_venture_list_contents: true,
            check_gathered_items_per_character: false,
            only_show_missing_gathered_items: false,
        }
    }
}

impl Configuration {
    pub fn find_character(&self, local_content_id: u64) -> Option<&Character> {
        self.characters
            .iter()
            .find(|c| c.local_content_id == local_content_id)
    }

    pub fn find_character_mut(&mut self, local_content_id: u64) -> Option<&mut Character> {
        self.characters
            .iter_mut()
            .find(|c| c.local_content_id == local_content_id)
    }

    /// Look a character up by name, ignoring case.
    pub fn find_character_by_name(&self, name: &str) -> Option<&Character> {
        self.characters
            .iter()
            .find(|c| c.character_name.eq_ignore_ascii_case(name))
    }

    pub fn find_item_list(&self, id: Uuid) -> Option<&ItemList> {
        self.item_lists.iter().find(|l| l.id == id)
    }

    pub fn find_item_list_mut(&mut self, id: Uuid) -> Option<&mut ItemList> {
        self.item_lists.iter_mut().find(|l| l.id == id)
    }

    /// Look a list up by name, ignoring case.
    pub fn find_item_list_by_name(&self, name: &str) -> Option<&ItemList> {
        self.item_lists
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
    }

    pub fn find_character_group(&self, id: Uuid) -> Option<&CharacterGroup> {
        self.character_groups.iter().find(|g| g.id == id)
    }

    pub fn find_character_group_by_name(&self, name: &str) -> Option<&CharacterGroup> {
        self.character_groups
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name))
    }

    /// List ids in effect for a character, according to its mode.
    ///
    /// Returns `None` when the character belongs to a group that no longer
    /// exists.
    pub fn effective_item_list_ids<'a>(&'a self, character: &'a Character) -> Option<&'a [Uuid]> {
        match character.character_type {
            CharacterType::NotManaged => Some(&[]),
            CharacterType::Standalone => Some(&character.item_list_ids),
            CharacterType::PartOfCharacterGroup => character
                .character_group_id
                .and_then(|id| self.find_character_group(id))
                .map(|group| group.item_list_ids.as_slice()),
        }
    }

    /// Resolved lists in effect for a character; dangling ids are skipped.
    pub fn effective_item_lists(&self, character: &Character) -> Option<Vec<&ItemList>> {
        self.effective_item_list_ids(character).map(|ids| {
            ids.iter()
                .filter(|id| !id.is_nil())
                .filter_map(|id| self.find_item_list(*id))
                .collect()
        })
    }

    // ----- item lists ---------------------------------------------------

    /// Create a new item list and return its id.
    pub fn create_item_list(
        &mut self,
        name: &str,
        list_type: ListType,
        priority: ListPriority,
        check_retainer_inventory: bool,
    ) -> DomainResult<Uuid> {
        let name = self.validate_list_name(name, None)?;
        let mut list = ItemList::new(name, list_type, priority);
        list.check_retainer_inventory = check_retainer_inventory;
        let id = list.id;
        self.item_lists.push(list);
        Ok(id)
    }

    /// Change the name and behaviour of an existing list.
    pub fn update_item_list(
        &mut self,
        id: Uuid,
        name: &str,
        list_type: ListType,
        priority: ListPriority,
        check_retainer_inventory: bool,
    ) -> DomainResult<()> {
        let name = self.validate_list_name(name, Some(id))?;
        let list = self
            .find_item_list_mut(id)
            .ok_or(DomainError::ItemListNotFound(id))?;
        list.name = name;
        list.list_type = list_type;
        list.priority = priority;
        list.check_retainer_inventory = check_retainer_inventory;
        list.normalize_priority();
        Ok(())
    }

    /// Number of standalone characters and groups referencing a list.
    pub fn item_list_users(&self, id: Uuid) -> usize {
        let characters = self
            .characters
            .iter()
            .filter(|c| {
                c.character_type == CharacterType::Standalone && c.item_list_ids.contains(&id)
            })
            .count();
        let groups = self
            .character_groups
            .iter()
            .filter(|g| g.item_list_ids.contains(&id))
            .count();
        characters + groups
    }

    pub fn delete_item_list(&mut self, id: Uuid) -> DomainResult<ItemList> {
        let index = self
            .item_lists
            .iter()
            .position(|l| l.id == id)
            .ok_or(DomainError::ItemListNotFound(id))?;
        let users = self.item_list_users(id);
        if users > 0 {
            return Err(DomainError::ItemListInUse { id, users });
        }
        Ok(self.item_lists.remove(index))
    }

    /// Append an item to a list and return the new entry's internal id.
    pub fn add_queued_item(
        &mut self,
        list_id: Uuid,
        item_id: u32,
        quantity: i32,
    ) -> DomainResult<Uuid> {
        if quantity < 0 {
            return Err(DomainError::ValidationFailed(format!(
                "quantity must not be negative, got {quantity}"
            )));
        }
        let list = self
            .find_item_list_mut(list_id)
            .ok_or(DomainError::ItemListNotFound(list_id))?;
        let item = QueuedItem::new(item_id, quantity);
        let internal_id = item.internal_id;
        list.items.push(item);
        Ok(internal_id)
    }

    pub fn remove_queued_item(&mut self, list_id: Uuid, internal_id: Uuid) -> DomainResult<QueuedItem> {
        let list = self
            .find_item_list_mut(list_id)
            .ok_or(DomainError::ItemListNotFound(list_id))?;
        let index = list
            .items
            .iter()
            .position(|i| i.internal_id == internal_id)
            .ok_or(DomainError::QueuedItemNotFound(internal_id))?;
        Ok(list.items.remove(index))
    }

    /// Move an entry to `new_index`, clamped to the end of the list.
    pub fn move_queued_item(
        &mut self,
        list_id: Uuid,
        internal_id: Uuid,
        new_index: usize,
    ) -> DomainResult<()> {
        let list = self
            .find_item_list_mut(list_id)
            .ok_or(DomainError::ItemListNotFound(list_id))?;
        let index = list
            .items
            .iter()
            .position(|i| i.internal_id == internal_id)
            .ok_or(DomainError::QueuedItemNotFound(internal_id))?;
        let item = list.items.remove(index);
        let new_index = new_index.min(list.items.len());
        list.items.insert(new_index, item);
        Ok(())
    }

    pub fn set_queued_item_quantity(
        &mut self,
        list_id: Uuid,
        internal_id: Uuid,
        quantity: i32,
    ) -> DomainResult<()> {
        if quantity < 0 {
            return Err(DomainError::ValidationFailed(format!(
                "quantity must not be negative, got {quantity}"
            )));
        }
        let item = self
            .find_item_list_mut(list_id)
            .ok_or(DomainError::ItemListNotFound(list_id))?
            .find_item_mut(internal_id)
            .ok_or(DomainError::QueuedItemNotFound(internal_id))?;
        item.remaining_quantity = quantity;
        Ok(())
    }

    // ----- character groups ---------------------------------------------

    pub fn create_character_group(&mut self, name: &str) -> DomainResult<Uuid> {
        let name = self.validate_group_name(name, None)?;
        let group = CharacterGroup::new(name);
        let id = group.id;
        self.character_groups.push(group);
        Ok(id)
    }

    pub fn rename_character_group(&mut self, id: Uuid, name: &str) -> DomainResult<()> {
        let name = self.validate_group_name(name, Some(id))?;
        let group = self
            .character_groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(DomainError::CharacterGroupNotFound(id))?;
        group.name = name;
        Ok(())
    }

    /// Characters assigned to a group.
    pub fn group_members(&self, id: Uuid) -> Vec<&Character> {
        self.characters
            .iter()
            .filter(|c| {
                c.character_type == CharacterType::PartOfCharacterGroup
                    && c.character_group_id == Some(id)
            })
            .collect()
    }

    pub fn delete_character_group(&mut self, id: Uuid) -> DomainResult<CharacterGroup> {
        let index = self
            .character_groups
            .iter()
            .position(|g| g.id == id)
            .ok_or(DomainError::CharacterGroupNotFound(id))?;
        let characters = self.group_members(id).len();
        if characters > 0 {
            return Err(DomainError::CharacterGroupInUse { id, characters });
        }
        Ok(self.character_groups.remove(index))
    }

    pub fn add_item_list_to_group(&mut self, group_id: Uuid, list_id: Uuid) -> DomainResult<()> {
        if self.find_item_list(list_id).is_none() {
            return Err(DomainError::ItemListNotFound(list_id));
        }
        let group = self
            .character_groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or(DomainError::CharacterGroupNotFound(group_id))?;
        if !group.item_list_ids.contains(&list_id) {
            group.item_list_ids.push(list_id);
        }
        Ok(())
    }

    pub fn remove_item_list_from_group(&mut self, group_id: Uuid, list_id: Uuid) -> DomainResult<()> {
        let group = self
            .character_groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or(DomainError::CharacterGroupNotFound(group_id))?;
        group.item_list_ids.retain(|id| *id != list_id);
        Ok(())
    }

    // ----- characters -----------------------------------------------------

    /// Change how a character is managed.
    ///
    /// `group_id` is required for [`CharacterType::PartOfCharacterGroup`] and
    /// ignored otherwise.
    pub fn set_character_type(
        &mut self,
        local_content_id: u64,
        character_type: CharacterType,
        group_id: Option<Uuid>,
    ) -> DomainResult<()> {
        let group_id = match character_type {
            CharacterType::PartOfCharacterGroup => {
                let id = group_id.ok_or_else(|| {
                    DomainError::ValidationFailed(
                        "a character group is required for group management".to_string(),
                    )
                })?;
                if self.find_character_group(id).is_none() {
                    return Err(DomainError::CharacterGroupNotFound(id));
                }
                Some(id)
            }
            CharacterType::NotManaged | CharacterType::Standalone => None,
        };

        let character = self
            .find_character_mut(local_content_id)
            .ok_or(DomainError::CharacterNotFound(local_content_id))?;
        character.character_type = character_type;
        character.character_group_id = group_id;
        Ok(())
    }

    pub fn add_item_list_to_character(
        &mut self,
        local_content_id: u64,
        list_id: Uuid,
    ) -> DomainResult<()> {
        if self.find_item_list(list_id).is_none() {
            return Err(DomainError::ItemListNotFound(list_id));
        }
        let character = self
            .find_character_mut(local_content_id)
            .ok_or(DomainError::CharacterNotFound(local_content_id))?;
        if !character.item_list_ids.contains(&list_id) {
            character.item_list_ids.push(list_id);
        }
        Ok(())
    }

    pub fn remove_item_list_from_character(
        &mut self,
        local_content_id: u64,
        list_id: Uuid,
    ) -> DomainResult<()> {
        let character = self
            .find_character_mut(local_content_id)
            .ok_or(DomainError::CharacterNotFound(local_content_id))?;
        character.item_list_ids.retain(|id| *id != list_id);
        Ok(())
    }

    pub fn set_retainer_managed(
        &mut self,
        local_content_id: u64,
        retainer_name: &str,
        managed: bool,
    ) -> DomainResult<()> {
        let retainer = self
            .find_character_mut(local_content_id)
            .ok_or(DomainError::CharacterNotFound(local_content_id))?
            .find_retainer_mut(retainer_name)
            .ok_or_else(|| DomainError::RetainerNotFound(retainer_name.to_string()))?;
        retainer.managed = managed;
        Ok(())
    }

    /// Set the venture reserve, clamped to `0..=MAX_VENTURES_TO_KEEP`.
    pub fn set_ventures_to_keep(&mut self, ventures: u32) {
        self.misc.ventures_to_keep = ventures.min(MAX_VENTURES_TO_KEEP);
    }

    // ----- validation ---------------------------------------------------

    fn validate_list_name(&self, name: &str, existing: Option<Uuid>) -> DomainResult<String> {
        let name = validate_name(name)?;
        if self
            .item_lists
            .iter()
            .any(|l| Some(l.id) != existing && l.name.eq_ignore_ascii_case(&name))
        {
            return Err(DomainError::InvalidName(format!(
                "an item list named '{name}' already exists"
            )));
        }
        Ok(name)
    }

    fn validate_group_name(&self, name: &str, existing: Option<Uuid>) -> DomainResult<String> {
        let name = validate_name(name)?;
        if self
            .character_groups
            .iter()
            .any(|g| Some(g.id) != existing && g.name.eq_ignore_ascii_case(&name))
        {
            return Err(DomainError::InvalidName(format!(
                "a character group named '{name}' already exists"
            )));
        }
        Ok(name)
    }
}

fn validate_name(name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName("name cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}
