use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Configuration, PlannerConfig, VentureCatalog};
use crate::domain::ports::{CharacterDataSource, ConfigurationStore};
use crate::services::{notifications, AssignmentPlanner, PlanOutcome, PlannerContext, Reconciler};

/// Result of a dry-run "next venture" request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextVenture {
    pub character: String,
    pub retainer: String,
    pub venture_id: Option<u32>,
    pub venture_name: Option<String>,
}

/// Application facade over the configuration model
///
/// Owns the in-memory configuration, funnels every change through the
/// configuration store and runs the synchronous planning core between load
/// and save.
///
/// # Examples
///
/// ```no_run
/// use retainer_control::application::RetainerControl;
/// use retainer_control::domain::models::{PlannerConfig, VentureCatalog};
/// use retainer_control::infrastructure::store::JsonConfigurationStore;
/// use std::sync::Arc;
///
/// async fn example() -> anyhow::Result<()> {
///     let store = Arc::new(JsonConfigurationStore::new(".arc/state.json"));
///     let control = RetainerControl::open(
///         store,
///         Arc::new(VentureCatalog::default()),
///         &PlannerConfig::default(),
///     )
///     .await?;
///     control
///         .edit(|c| c.create_item_list("Ores", Default::default(), Default::default(), false))
///         .await?;
///     Ok(())
/// }
/// ```
pub struct RetainerControl {
    store: Arc<dyn ConfigurationStore>,
    planner: AssignmentPlanner,
    reconciler: Reconciler,
    configuration: RwLock<Configuration>,
}

impl RetainerControl {
    /// Load the stored configuration and wire up the planner
    pub async fn open(
        store: Arc<dyn ConfigurationStore>,
        catalog: Arc<VentureCatalog>,
        planner: &PlannerConfig,
    ) -> Result<Self> {
        let configuration = store
            .load()
            .await
            .context("Failed to load the stored configuration")?;
        Ok(Self {
            store,
            planner: AssignmentPlanner::new(catalog, planner.filler_venture_id),
            reconciler: Reconciler::new(),
            configuration: RwLock::new(configuration),
        })
    }

    /// Snapshot of the current configuration
    pub async fn configuration(&self) -> Configuration {
        self.configuration.read().await.clone()
    }

    pub fn catalog(&self) -> &VentureCatalog {
        self.planner.catalog()
    }

    /// Apply an edit and persist it
    ///
    /// The edit runs against a copy; a failed edit or a failed save leaves
    /// the configuration untouched.
    pub async fn edit<T>(
        &self,
        f: impl FnOnce(&mut Configuration) -> DomainResult<T>,
    ) -> Result<T> {
        let mut guard = self.configuration.write().await;
        let mut draft = guard.clone();
        let value = f(&mut draft)?;
        self.store.save(&draft).await?;
        *guard = draft;
        Ok(value)
    }

    /// Merge live facts into the configuration, saving when anything changed
    #[instrument(skip_all)]
    pub async fn sync(&self, source: &dyn CharacterDataSource) -> Result<bool> {
        let mut guard = self.configuration.write().await;
        let mut draft = guard.clone();
        let changed = self.reconciler.reconcile(&mut draft, source);
        if changed {
            self.store.save(&draft).await?;
            *guard = draft;
            info!("configuration updated from snapshot");
        } else {
            debug!("snapshot brought no changes");
        }
        Ok(changed)
    }

    /// Plan and record the next venture for a retainer
    #[instrument(skip(self, ctx))]
    pub async fn send_retainer_to_venture(
        &self,
        ctx: &PlannerContext<'_>,
        character_id: u64,
        retainer_name: &str,
    ) -> Result<PlanOutcome> {
        let mut guard = self.configuration.write().await;
        let mut draft = guard.clone();
        let outcome = self
            .planner
            .plan_next(&mut draft, ctx, character_id, retainer_name, false);
        if outcome.changed {
            self.store.save(&draft).await?;
            *guard = draft;
        }
        Ok(outcome)
    }

    /// Dry run of the next venture for a retainer
    ///
    /// Without a retainer name, the character's first retainer (by display
    /// order, then id) is used.
    pub async fn next_venture(
        &self,
        ctx: &PlannerContext<'_>,
        character_id: u64,
        retainer_name: Option<&str>,
    ) -> Result<NextVenture> {
        let configuration = self.configuration.read().await;
        let character = configuration
            .find_character(character_id)
            .ok_or(DomainError::CharacterNotFound(character_id))?;
        let retainer = match retainer_name {
            Some(name) => character
                .find_retainer(name)
                .ok_or_else(|| DomainError::RetainerNotFound(name.to_string()))?,
            None => character.first_retainer().ok_or_else(|| {
                DomainError::RetainerNotFound(format!("no retainers for {character}"))
            })?,
        };

        let venture_id = self
            .planner
            .preview_next(&configuration, ctx, character_id, &retainer.name);
        Ok(NextVenture {
            character: character.to_string(),
            retainer: retainer.name.clone(),
            venture_id,
            venture_name: venture_id.map(|id| self.venture_label(id)),
        })
    }

    /// Display name of a venture
    pub fn venture_label(&self, venture_id: u32) -> String {
        if venture_id == self.planner.filler_venture_id() {
            return notifications::filler_name(self.catalog(), venture_id);
        }
        self.catalog()
            .venture(venture_id)
            .map_or_else(|| format!("venture #{venture_id}"), |v| v.name.clone())
    }
}
