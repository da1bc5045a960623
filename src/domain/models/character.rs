//! Character and retainer domain models.
//!
//! A character owns its retainers exclusively. Retainer facts (level, job,
//! stats, venture state) are written by reconciliation; the `managed` flag is
//! the only retainer field owned by the user.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a character's retainers are managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CharacterType {
    /// Retainers are left alone.
    #[default]
    NotManaged,
    /// Uses the character's own item list references.
    Standalone,
    /// Uses the item lists of the referenced character group.
    PartOfCharacterGroup,
}

impl CharacterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotManaged => "not_managed",
            Self::Standalone => "standalone",
            Self::PartOfCharacterGroup => "group",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "not_managed" | "notmanaged" | "unmanaged" | "none" => Some(Self::NotManaged),
            "standalone" => Some(Self::Standalone),
            "group" | "part_of_character_group" => Some(Self::PartOfCharacterGroup),
            _ => None,
        }
    }
}

impl std::fmt::Display for CharacterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A player character together with its retainers and list assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub local_content_id: u64,
    pub character_name: String,
    pub world_name: String,
    #[serde(rename = "type", default)]
    pub character_type: CharacterType,
    /// Only meaningful for [`CharacterType::PartOfCharacterGroup`].
    #[serde(default)]
    pub character_group_id: Option<Uuid>,
    /// Only meaningful for [`CharacterType::Standalone`].
    #[serde(default)]
    pub item_list_ids: Vec<Uuid>,
    #[serde(default)]
    pub retainers: Vec<Retainer>,
    /// Gathered item ids the character has unlocked for ventures.
    #[serde(default)]
    pub gathered_items: BTreeSet<u32>,
    /// Remaining venture currency.
    #[serde(default)]
    pub ventures: u32,
}

impl Character {
    /// Create an unmanaged character as first seen by reconciliation.
    pub fn new(local_content_id: u64, character_name: String, world_name: String) -> Self {
        Self {
            local_content_id,
            character_name,
            world_name,
            character_type: CharacterType::NotManaged,
            character_group_id: None,
            item_list_ids: Vec::new(),
            retainers: Vec::new(),
            gathered_items: BTreeSet::new(),
            ventures: 0,
        }
    }

    pub fn is_managed(&self) -> bool {
        self.character_type != CharacterType::NotManaged
    }

    pub fn find_retainer(&self, name: &str) -> Option<&Retainer> {
        self.retainers.iter().find(|r| r.name == name)
    }

    pub fn find_retainer_mut(&mut self, name: &str) -> Option<&mut Retainer> {
        self.retainers.iter_mut().find(|r| r.name == name)
    }

    /// Retainer that a debug request without an explicit name refers to:
    /// lowest display order, then lowest id.
    pub fn first_retainer(&self) -> Option<&Retainer> {
        self.retainers
            .iter()
            .min_by_key(|r| (r.display_order, r.identity.content_id().unwrap_or(0)))
    }

    /// Whether the character has unlocked the gathered item for ventures.
    pub fn has_unlocked(&self, gathered_item_id: u32) -> bool {
        self.gathered_items.contains(&gathered_item_id)
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.character_name, self.world_name)
    }
}

/// Retainer identity.
///
/// Records stored before stable retainer ids were available only carry a
/// name. They are upgraded to [`RetainerIdentity::Tracked`] by reconciliation
/// and removed if they cannot be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RetainerIdentity {
    #[default]
    Legacy,
    Tracked(u64),
}

impl RetainerIdentity {
    pub fn content_id(&self) -> Option<u64> {
        match self {
            Self::Legacy => None,
            Self::Tracked(id) => Some(*id),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy)
    }
}

/// A retainer owned by a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retainer {
    #[serde(default)]
    pub identity: RetainerIdentity,
    pub name: String,
    /// User opt-in for automatic venture assignment.
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub job: u32,
    #[serde(default)]
    pub has_venture: bool,
    #[serde(default)]
    pub last_venture: u32,
    /// Average item level; the combat capability score.
    #[serde(default)]
    pub item_level: u32,
    #[serde(default)]
    pub gathering: u32,
    #[serde(default)]
    pub perception: u32,
}

impl Retainer {
    /// Create an unmanaged retainer with a stable id and no facts yet.
    pub fn new(content_id: u64, name: String) -> Self {
        Self {
            identity: RetainerIdentity::Tracked(content_id),
            name,
            managed: false,
            display_order: 0,
            level: 0,
            job: 0,
            has_venture: false,
            last_venture: 0,
            item_level: 0,
            gathering: 0,
            perception: 0,
        }
    }

    /// Create a name-only record, as persisted by older configurations.
    pub fn legacy(name: String) -> Self {
        Self {
            identity: RetainerIdentity::Legacy,
            ..Self::new(0, name)
        }
    }

    pub fn content_id(&self) -> Option<u64> {
        self.identity.content_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_character_is_not_managed() {
        let character = Character::new(1, "Alpha".to_string(), "Zodiark".to_string());
        assert_eq!(character.character_type, CharacterType::NotManaged);
        assert!(!character.is_managed());
        assert_eq!(character.to_string(), "Alpha @ Zodiark");
    }

    #[test]
    fn test_character_type_parsing() {
        assert_eq!(CharacterType::from_str("standalone"), Some(CharacterType::Standalone));
        assert_eq!(CharacterType::from_str("GROUP"), Some(CharacterType::PartOfCharacterGroup));
        assert_eq!(CharacterType::from_str("unmanaged"), Some(CharacterType::NotManaged));
        assert_eq!(CharacterType::from_str("bogus"), None);
    }

    #[test]
    fn test_first_retainer_orders_by_display_order_then_id() {
        let mut character = Character::new(1, "Alpha".to_string(), "Zodiark".to_string());
        let mut late = Retainer::new(5, "Late".to_string());
        late.display_order = 2;
        let mut early_high = Retainer::new(9, "EarlyHigh".to_string());
        early_high.display_order = 1;
        let mut early_low = Retainer::new(3, "EarlyLow".to_string());
        early_low.display_order = 1;
        character.retainers = vec![late, early_high, early_low];

        assert_eq!(character.first_retainer().map(|r| r.name.as_str()), Some("EarlyLow"));
    }

    #[test]
    fn test_legacy_identity_serialization() {
        let retainer = Retainer::legacy("Old".to_string());
        let json = serde_json::to_value(&retainer).unwrap();
        assert_eq!(json["identity"]["kind"], "legacy");

        let back: Retainer = serde_json::from_value(json).unwrap();
        assert!(back.identity.is_legacy());
        assert_eq!(back.content_id(), None);
    }

    #[test]
    fn test_missing_identity_defaults_to_legacy() {
        let back: Retainer = serde_json::from_str(r#"{"name":"Old","managed":true}"#).unwrap();
        assert!(back.identity.is_legacy());
        assert!(back.managed);
    }
}
