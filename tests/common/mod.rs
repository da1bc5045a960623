//! Common test utilities for integration tests
//!
//! Provides an in-memory stand-in for every collaborator the planner talks
//! to, plus catalog and configuration builders.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use retainer_control::domain::models::{
    AdditionalRetainerData, CatalogData, CharacterSnapshot, CharacterType, Configuration,
    GatherableItem, ListPriority, ListType, RetainerSnapshot, Venture, VentureCatalog,
    VentureCategory, VentureReward,
};
use retainer_control::domain::ports::{
    CharacterDataSource, ExecutionSystem, InventorySource, Notifier,
};
use retainer_control::services::PlannerContext;
use uuid::Uuid;

pub const CHARACTER_ID: u64 = 0x0040_0000_0000_0001;
pub const MINER_ID: u64 = 101;
pub const FIGHTER_ID: u64 = 102;
pub const FISHER_ID: u64 = 103;

pub const COPPER_ORE: u32 = 5106;
pub const TIN_ORE: u32 = 5107;
pub const LEATHER: u32 = 5275;
pub const SALMON: u32 = 4869;

/// Gathered item id that unlocks SALMON
pub const SALMON_UNLOCK: u32 = 900;

/// In-memory game state serving every planner port
pub struct FakeWorld {
    pub characters: Vec<CharacterSnapshot>,
    pub stats: HashMap<(u64, String), AdditionalRetainerData>,
    pub own_inventory: HashMap<(u64, u32), u32>,
    pub retainer_inventory: HashMap<(u64, u32), u32>,
    pub reassign: bool,
    pub messages: Mutex<Vec<String>>,
}

impl FakeWorld {
    /// One character with a miner, a fighter and a fisher, 100 ventures
    pub fn new() -> Self {
        let mut stats = HashMap::new();
        stats.insert(
            (CHARACTER_ID, "Digger".to_string()),
            AdditionalRetainerData {
                item_level: 0,
                gathering: 400,
                perception: 150,
            },
        );
        stats.insert(
            (CHARACTER_ID, "Brawler".to_string()),
            AdditionalRetainerData {
                item_level: 100,
                gathering: 0,
                perception: 0,
            },
        );
        stats.insert(
            (CHARACTER_ID, "Angler".to_string()),
            AdditionalRetainerData {
                item_level: 0,
                gathering: 400,
                perception: 400,
            },
        );

        Self {
            characters: vec![CharacterSnapshot {
                content_id: CHARACTER_ID,
                name: "Alpha Tester".to_string(),
                world: "Zodiark".to_string(),
                exclude_retainer: false,
                unlocked_gathering_items: BTreeSet::from([SALMON_UNLOCK]),
                ventures: 100,
                retainers: vec![
                    retainer(MINER_ID, "Digger", 16, 0),
                    retainer(FIGHTER_ID, "Brawler", 1, 1),
                    retainer(FISHER_ID, "Angler", 18, 2),
                ],
            }],
            stats,
            own_inventory: HashMap::new(),
            retainer_inventory: HashMap::new(),
            reassign: true,
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn context(&self) -> PlannerContext<'_> {
        PlannerContext {
            source: self,
            inventory: self,
            execution: self,
            notifier: self,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn character_mut(&mut self) -> &mut CharacterSnapshot {
        &mut self.characters[0]
    }
}

impl Default for FakeWorld {
    fn default() -> Self {
        Self::new()
    }
}

pub fn retainer(id: u64, name: &str, job: u32, display_order: i32) -> RetainerSnapshot {
    RetainerSnapshot {
        retainer_id: id,
        name: name.to_string(),
        display_order,
        level: 50,
        job,
        has_venture: false,
        venture_id: 0,
    }
}

impl CharacterDataSource for FakeWorld {
    fn registered_characters(&self) -> Vec<u64> {
        self.characters.iter().map(|c| c.content_id).collect()
    }

    fn offline_character_data(&self, content_id: u64) -> Option<CharacterSnapshot> {
        self.characters
            .iter()
            .find(|c| c.content_id == content_id)
            .cloned()
    }

    fn additional_retainer_data(&self, content_id: u64, retainer_name: &str) -> AdditionalRetainerData {
        self.stats
            .get(&(content_id, retainer_name.to_string()))
            .copied()
            .unwrap_or_default()
    }
}

impl InventorySource for FakeWorld {
    fn character_item_count(&self, content_id: u64, item_id: u32) -> u32 {
        self.own_inventory
            .get(&(content_id, item_id))
            .copied()
            .unwrap_or(0)
    }

    fn retainer_item_count(&self, retainer_id: u64, item_id: u32) -> u32 {
        self.retainer_inventory
            .get(&(retainer_id, item_id))
            .copied()
            .unwrap_or(0)
    }
}

impl ExecutionSystem for FakeWorld {
    fn should_reassign(&self) -> bool {
        self.reassign
    }
}

impl Notifier for FakeWorld {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

fn reward(quantity: u32, threshold: u32) -> VentureReward {
    VentureReward {
        quantity,
        item_level_combat: threshold,
        perception_miner_botanist: threshold,
        perception_fisher: threshold,
    }
}

fn venture(id: u32, item_id: u32, name: &str, category: VentureCategory, rewards: Vec<VentureReward>) -> Venture {
    Venture {
        id,
        item_id,
        name: name.to_string(),
        level: 1,
        category,
        item_level_combat: 0,
        required_gathering: 0,
        rewards,
    }
}

/// Catalog with two ores, leather and salmon
///
/// Reward tiers: ores 20 / 60 (perception 100), leather 3 / 6 (item level
/// 50), salmon 2 / 5 (perception 300).
pub fn catalog() -> Arc<VentureCatalog> {
    let data = CatalogData {
        ventures: vec![
            venture(10, COPPER_ORE, "Copper Ore", VentureCategory::Miner, vec![reward(20, 0), reward(60, 100)]),
            venture(11, TIN_ORE, "Tin Ore", VentureCategory::Miner, vec![reward(20, 0), reward(60, 100)]),
            venture(20, LEATHER, "Leather", VentureCategory::Combat, vec![reward(3, 0), reward(6, 50)]),
            venture(30, SALMON, "Salmon", VentureCategory::Fisher, vec![reward(2, 0), reward(5, 300)]),
        ],
        gatherable_items: vec![GatherableItem {
            gathered_item_id: SALMON_UNLOCK,
            item_id: SALMON,
            name: "Salmon".to_string(),
        }],
    };
    Arc::new(VentureCatalog::new(data).unwrap())
}

/// Configuration after a first sync, with the character standalone and
/// every retainer managed
pub fn managed_configuration(world: &FakeWorld) -> Configuration {
    use retainer_control::services::Reconciler;

    let mut configuration = Configuration::default();
    Reconciler::new().reconcile(&mut configuration, world);
    configuration
        .set_character_type(CHARACTER_ID, CharacterType::Standalone, None)
        .unwrap();
    for name in ["Digger", "Brawler", "Angler"] {
        configuration
            .set_retainer_managed(CHARACTER_ID, name, true)
            .unwrap();
    }
    configuration
}

/// Create a list, assign it to the character and fill it
pub fn add_list(
    configuration: &mut Configuration,
    name: &str,
    list_type: ListType,
    priority: ListPriority,
    items: &[(u32, i32)],
) -> Uuid {
    let id = configuration
        .create_item_list(name, list_type, priority, false)
        .unwrap();
    for (item_id, quantity) in items {
        configuration.add_queued_item(id, *item_id, *quantity).unwrap();
    }
    configuration
        .add_item_list_to_character(CHARACTER_ID, id)
        .unwrap();
    id
}
