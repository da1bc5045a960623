//! Property-based tests for reconciliation and planning
//!
//! Uses proptest to check that syncing is idempotent, never produces
//! duplicate retainers, and that dry runs leave the configuration alone.

mod common;

use std::collections::HashSet;

use common::*;
use proptest::prelude::*;
use retainer_control::domain::models::{Configuration, ListPriority, ListType, QUICK_VENTURE_ID};
use retainer_control::services::{AssignmentPlanner, Reconciler};

/// Retainer roster drawn from a small id space so duplicates show up
fn roster() -> impl Strategy<Value = Vec<(u64, u32, i32)>> {
    prop::collection::vec((1u64..8, prop::sample::select(vec![1u32, 16, 17, 18]), 0i32..10), 0..10)
}

fn world_with(roster: &[(u64, u32, i32)]) -> FakeWorld {
    let mut world = FakeWorld::new();
    world.character_mut().retainers = roster
        .iter()
        .map(|(id, job, order)| retainer(*id, &format!("Retainer{id}"), *job, *order))
        .collect();
    world
}

proptest! {
    #[test]
    fn prop_second_sync_changes_nothing(first in roster(), second in roster()) {
        let reconciler = Reconciler::new();
        let mut configuration = Configuration::default();

        reconciler.reconcile(&mut configuration, &world_with(&first));
        let world = world_with(&second);
        reconciler.reconcile(&mut configuration, &world);
        let settled = configuration.clone();

        prop_assert!(!reconciler.reconcile(&mut configuration, &world));
        prop_assert_eq!(configuration, settled);
    }

    #[test]
    fn prop_retainer_ids_stay_unique(first in roster(), second in roster()) {
        let reconciler = Reconciler::new();
        let mut configuration = Configuration::default();

        reconciler.reconcile(&mut configuration, &world_with(&first));
        reconciler.reconcile(&mut configuration, &world_with(&second));

        let character = configuration.find_character(CHARACTER_ID).unwrap();
        let mut seen = HashSet::new();
        for retainer in &character.retainers {
            let id = retainer.content_id();
            prop_assert!(id.is_some());
            prop_assert!(seen.insert(id));
        }
        let expected: HashSet<u64> = second.iter().map(|(id, _, _)| *id).collect();
        prop_assert_eq!(seen.len(), expected.len());
    }

    #[test]
    fn prop_dry_run_is_pure(quantity in 0i32..500, stock in 0u32..200, ventures in 0u32..50) {
        let mut world = FakeWorld::new();
        world.character_mut().ventures = ventures;
        world.own_inventory.insert((CHARACTER_ID, TIN_ORE), stock);
        let mut configuration = managed_configuration(&world);
        add_list(&mut configuration, "Ores", ListType::CollectOneTime, ListPriority::InOrder, &[(COPPER_ORE, quantity)]);
        add_list(&mut configuration, "Restock", ListType::KeepStocked, ListPriority::Balanced, &[(TIN_ORE, 100)]);
        let planner = AssignmentPlanner::new(catalog(), QUICK_VENTURE_ID);
        let before = configuration.clone();

        let preview = planner.plan_next(&mut configuration, &world.context(), CHARACTER_ID, "Digger", true);
        prop_assert_eq!(&configuration, &before);
        prop_assert!(!preview.changed);

        let real = planner.plan_next(&mut configuration, &world.context(), CHARACTER_ID, "Digger", false);
        prop_assert_eq!(preview.venture_id, real.venture_id);
        for list in &configuration.item_lists {
            for item in &list.items {
                prop_assert!(item.remaining_quantity >= 0);
            }
        }
    }
}
