//! Externally observed character and retainer facts.
//!
//! These are read-only inputs to reconciliation, produced by whatever
//! collaborator tracks the live game state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Offline data for one registered character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub content_id: u64,
    pub name: String,
    pub world: String,
    /// The character is excluded from retainer handling by the source.
    #[serde(default)]
    pub exclude_retainer: bool,
    #[serde(default)]
    pub unlocked_gathering_items: BTreeSet<u32>,
    #[serde(default)]
    pub ventures: u32,
    #[serde(default)]
    pub retainers: Vec<RetainerSnapshot>,
}

/// Facts about one retainer as reported by the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetainerSnapshot {
    pub retainer_id: u64,
    pub name: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub job: u32,
    #[serde(default)]
    pub has_venture: bool,
    #[serde(default)]
    pub venture_id: u32,
}

/// Supplemental stats that are reported separately from the offline data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalRetainerData {
    #[serde(default)]
    pub item_level: u32,
    #[serde(default)]
    pub gathering: u32,
    #[serde(default)]
    pub perception: u32,
}
