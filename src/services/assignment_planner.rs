use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::models::{
    Character, Configuration, ItemList, ListPriority, ListType, QueuedItem, VentureCatalog,
};
use crate::domain::ports::{CharacterDataSource, ExecutionSystem, InventorySource, Notifier};
use crate::services::notifications;
use crate::services::{InProgressEstimator, Reconciler, VentureResolver};

/// Collaborators consulted during one planning request.
#[derive(Clone, Copy)]
pub struct PlannerContext<'a> {
    pub source: &'a dyn CharacterDataSource,
    pub inventory: &'a dyn InventorySource,
    pub execution: &'a dyn ExecutionSystem,
    pub notifier: &'a dyn Notifier,
}

/// Result of a planning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanOutcome {
    /// Venture the retainer should be sent on, if any
    pub venture_id: Option<u32>,
    /// Whether the configuration was written and should be persisted
    pub changed: bool,
}

/// What planning decided, computed before anything is written.
enum Choice {
    Assign {
        venture_id: u32,
        list_id: Uuid,
        /// One-time item to count down, with the reward quantity
        collect: Option<(Uuid, u32)>,
        message: String,
    },
    Filler {
        message: String,
    },
    Nothing,
}

/// Service choosing the next venture for a retainer.
///
/// Lists are worked strictly first-fit: the first list, and within it the
/// first candidate item, that the retainer can productively venture for wins.
/// When nothing qualifies the retainer is sent on the filler venture, unless
/// it is already on it.
#[derive(Debug, Clone)]
pub struct AssignmentPlanner {
    resolver: VentureResolver,
    estimator: InProgressEstimator,
    reconciler: Reconciler,
    filler_venture_id: u32,
}

impl AssignmentPlanner {
    pub fn new(catalog: Arc<VentureCatalog>, filler_venture_id: u32) -> Self {
        let resolver = VentureResolver::new(catalog);
        Self {
            estimator: InProgressEstimator::new(resolver.clone()),
            resolver,
            reconciler: Reconciler::new(),
            filler_venture_id,
        }
    }

    pub fn catalog(&self) -> &VentureCatalog {
        self.resolver.catalog()
    }

    pub fn filler_venture_id(&self) -> u32 {
        self.filler_venture_id
    }

    /// Plan the next venture for a retainer.
    ///
    /// Reconciles `configuration` against the data source first. In a dry
    /// run the whole request runs against a scratch copy and the outcome
    /// never reports a change.
    #[instrument(skip(self, configuration, ctx))]
    pub fn plan_next(
        &self,
        configuration: &mut Configuration,
        ctx: &PlannerContext<'_>,
        character_id: u64,
        retainer_name: &str,
        dry_run: bool,
    ) -> PlanOutcome {
        if dry_run {
            return PlanOutcome {
                venture_id: self.preview_next(configuration, ctx, character_id, retainer_name),
                changed: false,
            };
        }
        self.plan(configuration, ctx, character_id, retainer_name, false)
    }

    /// Venture a real planning request would choose right now, without
    /// touching `configuration`.
    pub fn preview_next(
        &self,
        configuration: &Configuration,
        ctx: &PlannerContext<'_>,
        character_id: u64,
        retainer_name: &str,
    ) -> Option<u32> {
        let mut scratch = configuration.clone();
        self.plan(&mut scratch, ctx, character_id, retainer_name, true)
            .venture_id
    }

    fn plan(
        &self,
        configuration: &mut Configuration,
        ctx: &PlannerContext<'_>,
        character_id: u64,
        retainer_name: &str,
        dry_run: bool,
    ) -> PlanOutcome {
        if !ctx.execution.should_reassign() {
            debug!("execution system does not reassign ventures");
            return PlanOutcome::default();
        }

        let Some(character) = configuration.find_character(character_id) else {
            debug!("character is not known");
            return PlanOutcome::default();
        };
        if !character.is_managed() {
            debug!(character = %character, "character is not managed");
            return PlanOutcome::default();
        }
        match character.find_retainer(retainer_name) {
            Some(retainer) if retainer.managed => {}
            Some(_) => {
                debug!(retainer = retainer_name, "retainer is not managed");
                return PlanOutcome::default();
            }
            None => {
                debug!(retainer = retainer_name, "retainer is not known");
                return PlanOutcome::default();
            }
        }

        let mut changed = self.reconciler.reconcile(configuration, ctx.source);

        match self.choose(configuration, ctx, character_id, retainer_name) {
            Choice::Nothing => PlanOutcome {
                venture_id: None,
                changed,
            },
            Choice::Assign {
                venture_id,
                list_id,
                collect,
                message,
            } => {
                if configuration.config_ui_options.show_assignment_chat_messages || dry_run {
                    ctx.notifier.notify(&message);
                }
                if !dry_run {
                    if let Some((internal_id, quantity)) = collect {
                        count_down(configuration, list_id, internal_id, quantity);
                    }
                    mark_sent(configuration, character_id, retainer_name, venture_id);
                    changed = true;
                }
                info!(retainer = retainer_name, venture_id, %list_id, dry_run, "assigned venture from list");
                PlanOutcome {
                    venture_id: Some(venture_id),
                    changed,
                }
            }
            Choice::Filler { message } => {
                if configuration.config_ui_options.show_assignment_chat_messages || dry_run {
                    ctx.notifier.notify(&message);
                }
                if !dry_run {
                    mark_sent(configuration, character_id, retainer_name, self.filler_venture_id);
                    changed = true;
                }
                info!(retainer = retainer_name, venture_id = self.filler_venture_id, dry_run, "assigned filler venture");
                PlanOutcome {
                    venture_id: Some(self.filler_venture_id),
                    changed,
                }
            }
        }
    }

    fn choose(
        &self,
        configuration: &Configuration,
        ctx: &PlannerContext<'_>,
        character_id: u64,
        retainer_name: &str,
    ) -> Choice {
        let Some(character) = configuration.find_character(character_id) else {
            return Choice::Nothing;
        };
        let Some(retainer) = character.find_retainer(retainer_name) else {
            debug!(retainer = retainer_name, "retainer disappeared during sync");
            return Choice::Nothing;
        };

        let reserve = configuration.misc.ventures_to_keep;
        if character.ventures == 0 || character.ventures <= reserve {
            warn!(
                ventures = character.ventures,
                ventures_to_keep = reserve,
                "venture reserve reached, skipping item lists"
            );
        } else {
            let in_progress = self.estimator.estimate(character);

            let Some(lists) = configuration.effective_item_lists(character) else {
                error!(
                    character = %character,
                    group_id = ?character.character_group_id,
                    "character group not found"
                );
                return Choice::Nothing;
            };

            for list in lists {
                debug!(list = %list.name, "checking list");
                for item in candidates(character, list, &in_progress, ctx.inventory) {
                    let Some((venture, reward)) = self
                        .resolver
                        .resolve(character, retainer, item.item_id)
                        .and_then(|resolution| resolution.productive())
                    else {
                        continue;
                    };

                    return Choice::Assign {
                        venture_id: venture.id,
                        list_id: list.id,
                        collect: (list.list_type == ListType::CollectOneTime)
                            .then_some((item.internal_id, reward.quantity)),
                        message: notifications::assignment_message(
                            &retainer.name,
                            reward.quantity,
                            &venture.name,
                            list,
                        ),
                    };
                }
            }
        }

        if retainer.last_venture == self.filler_venture_id {
            debug!(retainer = %retainer.name, "already on the filler venture");
            return Choice::Nothing;
        }
        Choice::Filler {
            message: notifications::end_of_list_message(
                &retainer.name,
                &notifications::filler_name(self.catalog(), self.filler_venture_id),
            ),
        }
    }
}

/// Items of a list still worth venturing for, in the order to try them.
fn candidates<'l>(
    character: &Character,
    list: &'l ItemList,
    in_progress: &HashMap<u32, u32>,
    inventory: &dyn InventorySource,
) -> Vec<&'l QueuedItem> {
    match list.list_type {
        ListType::CollectOneTime => list
            .items
            .iter()
            .filter(|item| item.remaining_quantity > 0)
            .collect(),
        ListType::KeepStocked => {
            let mut understocked: Vec<(&QueuedItem, i64)> = list
                .items
                .iter()
                .map(|item| (item, stock(character, list, item.item_id, in_progress, inventory)))
                .filter(|(item, stock)| *stock < i64::from(item.remaining_quantity))
                .collect();
            if list.priority == ListPriority::Balanced {
                understocked.sort_by_key(|(_, stock)| *stock);
            }
            understocked.into_iter().map(|(item, _)| item).collect()
        }
    }
}

fn stock(
    character: &Character,
    list: &ItemList,
    item_id: u32,
    in_progress: &HashMap<u32, u32>,
    inventory: &dyn InventorySource,
) -> i64 {
    let mut stock = i64::from(inventory.character_item_count(character.local_content_id, item_id))
        + i64::from(in_progress.get(&item_id).copied().unwrap_or_default());
    if list.check_retainer_inventory {
        stock += character
            .retainers
            .iter()
            .filter_map(|r| r.content_id())
            .map(|id| i64::from(inventory.retainer_item_count(id, item_id)))
            .sum::<i64>();
    }
    stock
}

fn count_down(configuration: &mut Configuration, list_id: Uuid, internal_id: Uuid, quantity: u32) {
    let Some(item) = configuration
        .find_item_list_mut(list_id)
        .and_then(|list| list.find_item_mut(internal_id))
    else {
        return;
    };
    let quantity = i32::try_from(quantity).unwrap_or(i32::MAX);
    item.remaining_quantity = item.remaining_quantity.saturating_sub(quantity).max(0);
}

fn mark_sent(configuration: &mut Configuration, character_id: u64, retainer_name: &str, venture_id: u32) {
    if let Some(retainer) = configuration
        .find_character_mut(character_id)
        .and_then(|c| c.find_retainer_mut(retainer_name))
    {
        retainer.has_venture = true;
        retainer.last_venture = venture_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        AdditionalRetainerData, CatalogData, CharacterSnapshot, CharacterType, Retainer,
        Venture, VentureCategory, VentureReward, QUICK_VENTURE_ID,
    };
    use std::sync::Mutex;

    const ORE: u32 = 5106;

    struct Fixture {
        snapshot: Option<CharacterSnapshot>,
        reassign: bool,
        messages: Mutex<Vec<String>>,
    }

    impl CharacterDataSource for Fixture {
        fn registered_characters(&self) -> Vec<u64> {
            self.snapshot.iter().map(|s| s.content_id).collect()
        }

        fn offline_character_data(&self, _content_id: u64) -> Option<CharacterSnapshot> {
            self.snapshot.clone()
        }

        fn additional_retainer_data(&self, _content_id: u64, _name: &str) -> AdditionalRetainerData {
            AdditionalRetainerData::default()
        }
    }

    impl InventorySource for Fixture {
        fn character_item_count(&self, _content_id: u64, _item_id: u32) -> u32 {
            0
        }

        fn retainer_item_count(&self, _retainer_id: u64, _item_id: u32) -> u32 {
            0
        }
    }

    impl ExecutionSystem for Fixture {
        fn should_reassign(&self) -> bool {
            self.reassign
        }
    }

    impl Notifier for Fixture {
        fn notify(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    fn fixture() -> Fixture {
        Fixture {
            snapshot: None,
            reassign: true,
            messages: Mutex::new(Vec::new()),
        }
    }

    fn context(fixture: &Fixture) -> PlannerContext<'_> {
        PlannerContext {
            source: fixture,
            inventory: fixture,
            execution: fixture,
            notifier: fixture,
        }
    }

    fn planner() -> AssignmentPlanner {
        let data = CatalogData {
            ventures: vec![Venture {
                id: 20,
                item_id: ORE,
                name: "Copper Ore".to_string(),
                level: 1,
                category: VentureCategory::Combat,
                item_level_combat: 0,
                required_gathering: 0,
                rewards: vec![VentureReward {
                    quantity: 60,
                    item_level_combat: 0,
                    perception_miner_botanist: 0,
                    perception_fisher: 0,
                }],
            }],
            gatherable_items: vec![],
        };
        AssignmentPlanner::new(Arc::new(VentureCatalog::new(data).unwrap()), QUICK_VENTURE_ID)
    }

    fn configuration(remaining: i32) -> Configuration {
        let mut config = Configuration::default();
        let list = config
            .create_item_list("Ores", ListType::CollectOneTime, ListPriority::InOrder, false)
            .unwrap();
        config.add_queued_item(list, ORE, remaining).unwrap();

        let mut character = Character::new(1, "Alpha".to_string(), "Zodiark".to_string());
        character.character_type = CharacterType::Standalone;
        character.item_list_ids.push(list);
        character.ventures = 100;
        let mut retainer = Retainer::new(11, "Helper".to_string());
        retainer.managed = true;
        retainer.level = 10;
        retainer.job = 1;
        character.retainers.push(retainer);
        config.characters.push(character);
        config
    }

    #[test]
    fn test_assigns_and_counts_down() {
        let fixture = fixture();
        let mut config = configuration(150);
        let outcome = planner().plan_next(&mut config, &context(&fixture), 1, "Helper", false);

        assert_eq!(outcome.venture_id, Some(20));
        assert!(outcome.changed);
        assert_eq!(config.item_lists[0].items[0].remaining_quantity, 90);
        let retainer = config.characters[0].find_retainer("Helper").unwrap();
        assert!(retainer.has_venture);
        assert_eq!(retainer.last_venture, 20);
        assert_eq!(fixture.messages.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_count_down_never_goes_negative() {
        let fixture = fixture();
        let mut config = configuration(10);
        planner().plan_next(&mut config, &context(&fixture), 1, "Helper", false);
        assert_eq!(config.item_lists[0].items[0].remaining_quantity, 0);
    }

    #[test]
    fn test_no_reassign_means_no_plan() {
        let mut fixture = fixture();
        fixture.reassign = false;
        let mut config = configuration(150);
        let before = config.clone();

        let outcome = planner().plan_next(&mut config, &context(&fixture), 1, "Helper", false);
        assert_eq!(outcome, PlanOutcome::default());
        assert_eq!(config, before);
    }

    #[test]
    fn test_dry_run_leaves_configuration_untouched() {
        let fixture = fixture();
        let mut config = configuration(150);
        config.config_ui_options.show_assignment_chat_messages = false;
        let before = config.clone();

        let outcome = planner().plan_next(&mut config, &context(&fixture), 1, "Helper", true);
        assert_eq!(outcome.venture_id, Some(20));
        assert!(!outcome.changed);
        assert_eq!(config, before);
        assert_eq!(fixture.messages.lock().unwrap().len(), 1, "dry runs always notify");
    }

    #[test]
    fn test_filler_when_nothing_left_then_nothing() {
        let fixture = fixture();
        let mut config = configuration(0);
        let planner = planner();

        let first = planner.plan_next(&mut config, &context(&fixture), 1, "Helper", false);
        assert_eq!(first.venture_id, Some(QUICK_VENTURE_ID));

        let before = config.clone();
        let second = planner.plan_next(&mut config, &context(&fixture), 1, "Helper", false);
        assert_eq!(second.venture_id, None);
        assert!(!second.changed);
        assert_eq!(config, before);
    }

    #[test]
    fn test_dangling_group_plans_nothing() {
        let fixture = fixture();
        let mut config = configuration(150);
        config.characters[0].character_type = CharacterType::PartOfCharacterGroup;
        config.characters[0].character_group_id = Some(Uuid::new_v4());

        let outcome = planner().plan_next(&mut config, &context(&fixture), 1, "Helper", false);
        assert_eq!(outcome.venture_id, None);
    }
}
