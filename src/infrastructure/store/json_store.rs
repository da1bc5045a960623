use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use crate::domain::models::Configuration;
use crate::domain::ports::ConfigurationStore;

/// Configuration store backed by a single pretty-printed JSON file
///
/// Saves go through a sibling temp file and a rename, so a crash mid-write
/// leaves the previous state in place.
#[derive(Debug, Clone)]
pub struct JsonConfigurationStore {
    path: PathBuf,
}

impl JsonConfigurationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigurationStore for JsonConfigurationStore {
    async fn load(&self) -> Result<Configuration> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no stored configuration, starting empty");
                return Ok(Configuration::default());
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read configuration from {}", self.path.display())
                })
            }
        };

        let configuration: Configuration = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse configuration in {}", self.path.display()))?;
        debug!(
            path = %self.path.display(),
            characters = configuration.characters.len(),
            item_lists = configuration.item_lists.len(),
            "configuration loaded"
        );
        Ok(configuration)
    }

    async fn save(&self, configuration: &Configuration) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let bytes = serde_json::to_vec_pretty(configuration)
            .context("Failed to serialize configuration")?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path).await.with_context(|| {
            format!(
                "Failed to move {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Character, Retainer};

    #[tokio::test]
    async fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonConfigurationStore::new(dir.path().join("state.json"));
        assert_eq!(store.load().await.unwrap(), Configuration::default());
    }

    #[tokio::test]
    async fn test_save_creates_parent_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonConfigurationStore::new(dir.path().join("nested/state.json"));

        let mut configuration = Configuration::default();
        let mut character = Character::new(7, "Alpha".to_string(), "Zodiark".to_string());
        character.retainers.push(Retainer::legacy("Old".to_string()));
        character.retainers.push(Retainer::new(3, "New".to_string()));
        configuration.characters.push(character);

        store.save(&configuration).await.unwrap();
        assert!(!dir.path().join("nested/state.json.tmp").exists());
        assert_eq!(store.load().await.unwrap(), configuration);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = JsonConfigurationStore::new(&path).load().await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration"));
    }
}
