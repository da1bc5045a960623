use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{error, info};

use crate::domain::models::{CatalogData, VentureCatalog};

/// Load and validate the venture catalog
///
/// `.json` files are read as JSON, everything else as YAML. A catalog that
/// fails validation is reported and returned as an error; it is never
/// partially used.
pub async fn load_catalog(path: impl AsRef<Path>) -> Result<VentureCatalog> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read venture catalog {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let data: CatalogData = if is_json {
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse venture catalog {}", path.display()))?
    } else {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse venture catalog {}", path.display()))?
    };

    let catalog = VentureCatalog::new(data).map_err(|err| {
        error!(path = %path.display(), error = %err, "venture catalog is invalid");
        err
    })?;
    info!(
        path = %path.display(),
        ventures = catalog.ventures().len(),
        gatherable_items = catalog.gatherable_items().len(),
        "venture catalog loaded"
    );
    Ok(catalog)
}
