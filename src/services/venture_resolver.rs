use std::sync::Arc;

use tracing::debug;

use crate::domain::models::{
    Character, Retainer, Venture, VentureCatalog, VentureCategory, VentureReward,
};

/// A venture a retainer could take for an item, with the reward tier the
/// retainer currently earns on it.
///
/// `reward` is `None` when the venture is known but the retainer's stats are
/// below its requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub venture: &'a Venture,
    pub reward: Option<&'a VentureReward>,
}

impl<'a> Resolution<'a> {
    /// The venture and reward, when the retainer would bring anything back.
    pub fn productive(&self) -> Option<(&'a Venture, &'a VentureReward)> {
        self.reward.map(|reward| (self.venture, reward))
    }
}

/// Service deciding which venture (if any) a retainer can use to fetch an item
#[derive(Debug, Clone)]
pub struct VentureResolver {
    catalog: Arc<VentureCatalog>,
}

impl VentureResolver {
    pub fn new(catalog: Arc<VentureCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &VentureCatalog {
        &self.catalog
    }

    /// Resolve the venture for `item_id` on behalf of `retainer`.
    ///
    /// Returns `None` when no venture fits the retainer's level and job, or
    /// when the item must be unlocked first and `character` has not done so.
    pub fn resolve(
        &self,
        character: &Character,
        retainer: &Retainer,
        item_id: u32,
    ) -> Option<Resolution<'_>> {
        let Some(venture) = self
            .catalog
            .ventures_for_item(item_id)
            .find(|v| v.level <= retainer.level && v.matches_job(retainer.job))
        else {
            debug!(item_id, retainer = %retainer.name, "no applicable venture found");
            return None;
        };

        if let Some(gatherable) = self.catalog.gatherable_item(item_id) {
            if !character.has_unlocked(gatherable.gathered_item_id) {
                debug!(
                    item_id,
                    venture = %venture.name,
                    character = %character,
                    "character hasn't unlocked the item yet"
                );
                return None;
            }
        }

        debug!(venture = %venture.name, venture_id = venture.id, "checking if venture is suitable");
        let reward = best_reward(venture, retainer);
        Some(Resolution { venture, reward })
    }
}

/// Last reward tier whose threshold the retainer meets.
///
/// Reward tables are ordered by increasing threshold, so the last qualifying
/// tier is the one the retainer currently earns.
fn best_reward<'a>(venture: &'a Venture, retainer: &Retainer) -> Option<&'a VentureReward> {
    match venture.category {
        VentureCategory::Miner | VentureCategory::Botanist => {
            if retainer.gathering < venture.required_gathering {
                return None;
            }
            venture
                .rewards
                .iter()
                .rev()
                .find(|r| retainer.perception >= r.perception_miner_botanist)
        }
        VentureCategory::Fisher => {
            if retainer.gathering < venture.required_gathering {
                return None;
            }
            venture
                .rewards
                .iter()
                .rev()
                .find(|r| retainer.perception >= r.perception_fisher)
        }
        VentureCategory::Combat => {
            if retainer.item_level < venture.item_level_combat {
                return None;
            }
            venture
                .rewards
                .iter()
                .rev()
                .find(|r| retainer.item_level >= r.item_level_combat)
        }
    }
}
