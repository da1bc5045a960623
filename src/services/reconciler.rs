use std::collections::HashSet;

use tracing::{debug, info, instrument, warn};

use crate::domain::models::{
    Character, CharacterSnapshot, Configuration, Retainer, RetainerIdentity,
};
use crate::domain::ports::CharacterDataSource;

/// Service merging externally observed character and retainer facts into the
/// configuration model.
///
/// Only facts are written: user-owned fields (character mode, list
/// assignment, retainer `managed` flag) are never touched. Every write is
/// idempotent, so running it twice on the same facts reports no change the
/// second time.
#[derive(Debug, Clone, Default)]
pub struct Reconciler;

impl Reconciler {
    pub fn new() -> Self {
        Self
    }

    /// Reconcile all registered characters.
    ///
    /// # Returns
    /// `true` if anything in `configuration` was written
    #[instrument(skip_all)]
    pub fn reconcile(
        &self,
        configuration: &mut Configuration,
        source: &dyn CharacterDataSource,
    ) -> bool {
        let mut changed = false;

        for content_id in source.registered_characters() {
            debug!(content_id, "sync for character");
            let Some(snapshot) = source.offline_character_data(content_id) else {
                debug!(content_id, "no offline data for registered character");
                continue;
            };
            if snapshot.exclude_retainer {
                continue;
            }

            let character = match configuration
                .characters
                .iter()
                .position(|c| c.local_content_id == content_id)
            {
                Some(index) => &mut configuration.characters[index],
                None => {
                    info!(character = %snapshot.name, world = %snapshot.world, "new character");
                    configuration.characters.push(Character::new(
                        content_id,
                        snapshot.name.clone(),
                        snapshot.world.clone(),
                    ));
                    changed = true;
                    let last = configuration.characters.len() - 1;
                    &mut configuration.characters[last]
                }
            };

            changed |= reconcile_character(character, &snapshot, source);
        }

        changed
    }
}

fn reconcile_character(
    character: &mut Character,
    snapshot: &CharacterSnapshot,
    source: &dyn CharacterDataSource,
) -> bool {
    let mut changed = false;

    if character.gathered_items != snapshot.unlocked_gathering_items {
        character.gathered_items = snapshot.unlocked_gathering_items.clone();
        changed = true;
    }

    if character.ventures != snapshot.ventures {
        character.ventures = snapshot.ventures;
        changed = true;
    }

    changed |= migrate_legacy_retainers(character, snapshot);

    let mut seen = HashSet::new();
    for data in &snapshot.retainers {
        if !seen.insert(data.retainer_id) {
            debug!(retainer = %data.name, retainer_id = data.retainer_id, "duplicate retainer in snapshot");
            continue;
        }

        let retainer = match character
            .retainers
            .iter()
            .position(|r| r.content_id() == Some(data.retainer_id))
        {
            Some(index) => &mut character.retainers[index],
            None => {
                debug!(retainer = %data.name, "new retainer");
                character
                    .retainers
                    .push(Retainer::new(data.retainer_id, data.name.clone()));
                changed = true;
                let last = character.retainers.len() - 1;
                &mut character.retainers[last]
            }
        };

        changed |= update(&mut retainer.name, &data.name);
        changed |= update(&mut retainer.display_order, &data.display_order);
        changed |= update(&mut retainer.level, &data.level);
        changed |= update(&mut retainer.job, &data.job);
        changed |= update(&mut retainer.has_venture, &data.has_venture);
        changed |= update(&mut retainer.last_venture, &data.venture_id);

        let additional = source.additional_retainer_data(snapshot.content_id, &data.name);
        changed |= update(&mut retainer.item_level, &additional.item_level);
        changed |= update(&mut retainer.gathering, &additional.gathering);
        changed |= update(&mut retainer.perception, &additional.perception);
    }

    // Drop retainers no longer reported (dismissed or moved) and any
    // duplicate records of the same retainer.
    let mut kept = HashSet::new();
    let before = character.retainers.len();
    character.retainers.retain(|r| match r.content_id() {
        Some(id) => seen.contains(&id) && kept.insert(id),
        None => false,
    });
    if character.retainers.len() != before {
        debug!(
            removed = before - character.retainers.len(),
            character = %character,
            "removed retainers"
        );
        changed = true;
    }

    changed
}

/// Upgrade name-only retainer records to stable ids, then drop the ones
/// that could not be matched.
fn migrate_legacy_retainers(character: &mut Character, snapshot: &CharacterSnapshot) -> bool {
    let mut changed = false;

    for index in 0..character.retainers.len() {
        if !character.retainers[index].identity.is_legacy() {
            continue;
        }

        let name = character.retainers[index].name.clone();
        let Some(data) = snapshot.retainers.iter().find(|r| r.name == name) else {
            continue;
        };
        let taken = character
            .retainers
            .iter()
            .any(|r| r.content_id() == Some(data.retainer_id));
        if taken {
            continue;
        }

        info!(retainer = %name, retainer_id = data.retainer_id, "migrated retainer to stable id");
        character.retainers[index].identity = RetainerIdentity::Tracked(data.retainer_id);
        changed = true;
    }

    let before = character.retainers.len();
    character.retainers.retain(|r| {
        if r.identity.is_legacy() {
            warn!(
                retainer = %r.name,
                character = %snapshot.name,
                world = %snapshot.world,
                "removing retainer without a stable id"
            );
            false
        } else {
            true
        }
    });
    changed || character.retainers.len() != before
}

fn update<T: PartialEq + Clone>(target: &mut T, value: &T) -> bool {
    if target == value {
        false
    } else {
        *target = value.clone();
        true
    }
}
