//! CLI command implementations.

pub mod character;
pub mod config;
pub mod group;
pub mod list;
pub mod locked_items;
pub mod sync;
pub mod venture;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::warn;

use crate::application::RetainerControl;
use crate::domain::models::{Config, VentureCatalog};
use crate::infrastructure::sources::{load_catalog, FileSnapshotSource};
use crate::infrastructure::store::JsonConfigurationStore;

/// Open the stored configuration.
///
/// Planning needs the venture catalog; editing commands fall back to an
/// empty one when the catalog file does not exist yet.
pub(crate) async fn open_control(config: &Config, require_catalog: bool) -> Result<RetainerControl> {
    let catalog_path = &config.sources.catalog_path;
    let catalog = if require_catalog || catalog_path.exists() {
        load_catalog(catalog_path).await?
    } else {
        warn!(path = %catalog_path.display(), "venture catalog not found, item names unavailable");
        VentureCatalog::default()
    };

    let store = Arc::new(JsonConfigurationStore::new(&config.storage.state_path));
    RetainerControl::open(store, Arc::new(catalog), &config.planner).await
}

pub(crate) async fn load_snapshot(config: &Config) -> Result<FileSnapshotSource> {
    FileSnapshotSource::load(&config.sources.snapshot_path)
        .await
        .context("Snapshot unavailable; nothing was changed")
}

/// Display name of an item, falling back to its id.
pub(crate) fn item_label(catalog: &VentureCatalog, item_id: u32) -> String {
    catalog
        .item_name(item_id)
        .map_or_else(|| format!("#{item_id}"), ToString::to_string)
}
