//! Venture definitions and the static venture catalog.
//!
//! The catalog is read-only game data supplied from outside. It is validated
//! once on construction; a catalog that fails validation is a data bug and is
//! never silently repaired.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Job category a venture belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VentureCategory {
    #[serde(alias = "min")]
    Miner,
    #[serde(alias = "btn")]
    Botanist,
    #[serde(alias = "fsh")]
    Fisher,
    #[serde(alias = "dowm")]
    Combat,
}

impl VentureCategory {
    /// Map a raw class/job category row id to a venture category.
    pub fn from_class_job_category(id: u32) -> Self {
        match id {
            17 => Self::Miner,
            18 => Self::Botanist,
            19 => Self::Fisher,
            _ => Self::Combat,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Miner => "MIN",
            Self::Botanist => "BTN",
            Self::Fisher => "FSH",
            Self::Combat => "DoWM",
        }
    }

    pub fn is_gathering(&self) -> bool {
        !matches!(self, Self::Combat)
    }
}

/// Retainer job codes of the gathering classes and the venture category each
/// of them works. Every job not listed here is a combat job.
pub const GATHERING_JOBS: [(u32, VentureCategory); 3] = [
    (16, VentureCategory::Miner),
    (17, VentureCategory::Botanist),
    (18, VentureCategory::Fisher),
];

/// Gathering category a retainer job works, or `None` for combat jobs.
pub fn gathering_category_for_job(job: u32) -> Option<VentureCategory> {
    GATHERING_JOBS
        .iter()
        .find(|(code, _)| *code == job)
        .map(|(_, category)| *category)
}

/// One reward tier of a venture: the quantity returned once the stat
/// threshold for the venture's category is met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VentureReward {
    pub quantity: u32,
    #[serde(default)]
    pub item_level_combat: u32,
    #[serde(default)]
    pub perception_miner_botanist: u32,
    #[serde(default)]
    pub perception_fisher: u32,
}

/// A venture (retainer task) definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venture {
    pub id: u32,
    pub item_id: u32,
    pub name: String,
    /// Minimum retainer level.
    pub level: u32,
    pub category: VentureCategory,
    #[serde(default)]
    pub item_level_combat: u32,
    #[serde(default)]
    pub required_gathering: u32,
    pub rewards: Vec<VentureReward>,
}

impl Venture {
    /// Whether a retainer with the given job may take this venture.
    pub fn matches_job(&self, job: u32) -> bool {
        match gathering_category_for_job(job) {
            Some(category) => category == self.category,
            None => !self.category.is_gathering(),
        }
    }
}

/// A gatherable item that must be unlocked per character before a retainer
/// can bring it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatherableItem {
    pub gathered_item_id: u32,
    pub item_id: u32,
    #[serde(default)]
    pub name: String,
}

/// Raw catalog contents as read from a data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub ventures: Vec<Venture>,
    #[serde(default)]
    pub gatherable_items: Vec<GatherableItem>,
}

/// Validated, ordered venture catalog.
#[derive(Debug, Clone, Default)]
pub struct VentureCatalog {
    ventures: Vec<Venture>,
    gatherable_items: Vec<GatherableItem>,
}

impl VentureCatalog {
    /// Validate the data and order ventures by level, then name, then id.
    pub fn new(data: CatalogData) -> DomainResult<Self> {
        let CatalogData {
            mut ventures,
            gatherable_items,
        } = data;

        let mut seen = HashSet::new();
        for venture in &ventures {
            if !seen.insert(venture.id) {
                return Err(DomainError::CatalogIntegrity(format!(
                    "duplicate venture id {}",
                    venture.id
                )));
            }
            if venture.id == 0 {
                return Err(DomainError::CatalogIntegrity(format!(
                    "venture '{}' has id 0",
                    venture.name
                )));
            }
            if venture.rewards.is_empty() {
                return Err(DomainError::CatalogIntegrity(format!(
                    "venture {} ('{}') has no reward tiers",
                    venture.id, venture.name
                )));
            }
        }

        let mut seen_items = HashSet::new();
        for item in &gatherable_items {
            if !seen_items.insert(item.item_id) {
                return Err(DomainError::CatalogIntegrity(format!(
                    "item {} is listed as gatherable more than once",
                    item.item_id
                )));
            }
        }

        ventures.sort_by(|a, b| {
            a.level
                .cmp(&b.level)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(Self {
            ventures,
            gatherable_items,
        })
    }

    pub fn ventures(&self) -> &[Venture] {
        &self.ventures
    }

    pub fn venture(&self, id: u32) -> Option<&Venture> {
        self.ventures.iter().find(|v| v.id == id)
    }

    /// Ventures producing `item_id`, in catalog order.
    pub fn ventures_for_item(&self, item_id: u32) -> impl Iterator<Item = &Venture> {
        self.ventures.iter().filter(move |v| v.item_id == item_id)
    }

    pub fn gatherable_items(&self) -> &[GatherableItem] {
        &self.gatherable_items
    }

    /// The unlock requirement for `item_id`, if it has one.
    pub fn gatherable_item(&self, item_id: u32) -> Option<&GatherableItem> {
        self.gatherable_items.iter().find(|g| g.item_id == item_id)
    }

    /// Display name of an item, taken from the first venture producing it.
    pub fn item_name(&self, item_id: u32) -> Option<&str> {
        self.ventures_for_item(item_id).next().map(|v| v.name.as_str())
    }
}
