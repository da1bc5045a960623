use std::collections::HashMap;

use tracing::trace;

use crate::domain::models::Character;
use crate::services::VentureResolver;

/// Service estimating how many of each item is already on its way back from
/// ventures that are still running.
#[derive(Debug, Clone)]
pub struct InProgressEstimator {
    resolver: VentureResolver,
}

impl InProgressEstimator {
    pub fn new(resolver: VentureResolver) -> Self {
        Self { resolver }
    }

    /// Map of item id to the quantity promised by running ventures.
    ///
    /// A retainer whose venture has finished but whose reward has not been
    /// collected yet still counts as in progress. Overcounting here only
    /// delays an assignment; undercounting would send two retainers after
    /// the same demand.
    pub fn estimate(&self, character: &Character) -> HashMap<u32, u32> {
        let mut in_progress: HashMap<u32, u32> = HashMap::new();

        for retainer in &character.retainers {
            if !retainer.managed || !retainer.has_venture || retainer.last_venture == 0 {
                continue;
            }

            let Some(venture) = self.resolver.catalog().venture(retainer.last_venture) else {
                continue;
            };

            let item_id = venture.item_id;
            let Some((_, reward)) = self
                .resolver
                .resolve(character, retainer, item_id)
                .and_then(|resolution| resolution.productive())
            else {
                continue;
            };

            *in_progress.entry(item_id).or_default() += reward.quantity;
        }

        for (item_id, quantity) in &in_progress {
            trace!(item_id, quantity, "venture in progress");
        }

        in_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        CatalogData, Retainer, Venture, VentureCatalog, VentureCategory, VentureReward,
    };
    use std::sync::Arc;

    fn estimator() -> InProgressEstimator {
        let data = CatalogData {
            ventures: vec![Venture {
                id: 30,
                item_id: 5275,
                name: "Leather".to_string(),
                level: 1,
                category: VentureCategory::Combat,
                item_level_combat: 0,
                required_gathering: 0,
                rewards: vec![VentureReward {
                    quantity: 6,
                    item_level_combat: 0,
                    perception_miner_botanist: 0,
                    perception_fisher: 0,
                }],
            }],
            gatherable_items: vec![],
        };
        let catalog = Arc::new(VentureCatalog::new(data).unwrap());
        InProgressEstimator::new(VentureResolver::new(catalog))
    }

    fn busy_retainer(id: u64, venture: u32) -> Retainer {
        let mut retainer = Retainer::new(id, format!("R{id}"));
        retainer.managed = true;
        retainer.has_venture = true;
        retainer.last_venture = venture;
        retainer.level = 10;
        retainer.job = 1;
        retainer
    }

    #[test]
    fn test_sums_rewards_per_item() {
        let mut character = Character::new(1, "Alpha".to_string(), "Zodiark".to_string());
        character.retainers = vec![busy_retainer(1, 30), busy_retainer(2, 30)];

        let in_progress = estimator().estimate(&character);
        assert_eq!(in_progress.get(&5275), Some(&12));
    }

    #[test]
    fn test_ignores_idle_unmanaged_and_unknown() {
        let mut character = Character::new(1, "Alpha".to_string(), "Zodiark".to_string());
        let mut idle = busy_retainer(1, 30);
        idle.has_venture = false;
        let mut unmanaged = busy_retainer(2, 30);
        unmanaged.managed = false;
        let unknown = busy_retainer(3, 999);
        let no_venture = busy_retainer(4, 0);
        character.retainers = vec![idle, unmanaged, unknown, no_venture];

        assert!(estimator().estimate(&character).is_empty());
    }
}
