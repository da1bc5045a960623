use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::domain::models::{AdditionalRetainerData, CharacterSnapshot, RetainerSnapshot};
use crate::domain::ports::{CharacterDataSource, ExecutionSystem, InventorySource};

/// On-disk layout of an exported snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Whether the venture executor wants retainers reassigned
    #[serde(default = "default_true")]
    pub should_reassign: bool,
    #[serde(default)]
    pub characters: Vec<CharacterRecord>,
    /// Third-party retainer inventory, keyed by retainer id then item id
    #[serde(default)]
    pub retainer_inventories: HashMap<u64, HashMap<u32, u32>>,
}

impl Default for SnapshotFile {
    fn default() -> Self {
        Self {
            should_reassign: true,
            characters: Vec::new(),
            retainer_inventories: HashMap::new(),
        }
    }
}

/// One character in the snapshot file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub content_id: u64,
    pub name: String,
    pub world: String,
    #[serde(default)]
    pub exclude_retainer: bool,
    #[serde(default)]
    pub unlocked_gathering_items: BTreeSet<u32>,
    #[serde(default)]
    pub ventures: u32,
    #[serde(default)]
    pub retainers: Vec<RetainerSnapshot>,
    /// Retainer stats by retainer name
    #[serde(default)]
    pub additional: HashMap<String, AdditionalRetainerData>,
    /// Own inventory by item id
    #[serde(default)]
    pub inventory: HashMap<u32, u32>,
}

impl CharacterRecord {
    fn to_snapshot(&self) -> CharacterSnapshot {
        CharacterSnapshot {
            content_id: self.content_id,
            name: self.name.clone(),
            world: self.world.clone(),
            exclude_retainer: self.exclude_retainer,
            unlocked_gathering_items: self.unlocked_gathering_items.clone(),
            ventures: self.ventures,
            retainers: self.retainers.clone(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Snapshot file adapter serving character facts, inventory counts and the
/// reassignment toggle
#[derive(Debug, Clone, Default)]
pub struct FileSnapshotSource {
    data: SnapshotFile,
}

impl FileSnapshotSource {
    pub fn new(data: SnapshotFile) -> Self {
        Self { data }
    }

    /// Read and parse a snapshot file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let data: SnapshotFile = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
        debug!(
            path = %path.display(),
            characters = data.characters.len(),
            "snapshot loaded"
        );
        Ok(Self::new(data))
    }

    fn record(&self, content_id: u64) -> Option<&CharacterRecord> {
        self.data
            .characters
            .iter()
            .find(|c| c.content_id == content_id)
    }
}

impl CharacterDataSource for FileSnapshotSource {
    fn registered_characters(&self) -> Vec<u64> {
        self.data.characters.iter().map(|c| c.content_id).collect()
    }

    fn offline_character_data(&self, content_id: u64) -> Option<CharacterSnapshot> {
        self.record(content_id).map(CharacterRecord::to_snapshot)
    }

    fn additional_retainer_data(
        &self,
        content_id: u64,
        retainer_name: &str,
    ) -> AdditionalRetainerData {
        self.record(content_id)
            .and_then(|c| c.additional.get(retainer_name))
            .copied()
            .unwrap_or_default()
    }
}

impl InventorySource for FileSnapshotSource {
    fn character_item_count(&self, content_id: u64, item_id: u32) -> u32 {
        self.record(content_id)
            .and_then(|c| c.inventory.get(&item_id))
            .copied()
            .unwrap_or(0)
    }

    fn retainer_item_count(&self, retainer_id: u64, item_id: u32) -> u32 {
        self.data
            .retainer_inventories
            .get(&retainer_id)
            .and_then(|items| items.get(&item_id))
            .copied()
            .unwrap_or(0)
    }
}

impl ExecutionSystem for FileSnapshotSource {
    fn should_reassign(&self) -> bool {
        self.data.should_reassign
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "characters": [{
            "content_id": 42,
            "name": "Alpha",
            "world": "Zodiark",
            "unlocked_gathering_items": [1, 2],
            "ventures": 80,
            "retainers": [{ "retainer_id": 7, "name": "Digger", "level": 50, "job": 16 }],
            "additional": { "Digger": { "gathering": 300, "perception": 250 } },
            "inventory": { "5106": 12 }
        }],
        "retainer_inventories": { "7": { "5106": 40 } }
    }"#;

    #[tokio::test]
    async fn test_load_and_serve() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        tokio::fs::write(&path, SNAPSHOT).await.unwrap();

        let source = FileSnapshotSource::load(&path).await.unwrap();
        assert!(source.should_reassign(), "missing toggle defaults to on");
        assert_eq!(source.registered_characters(), vec![42]);

        let snapshot = source.offline_character_data(42).unwrap();
        assert_eq!(snapshot.ventures, 80);
        assert_eq!(snapshot.retainers[0].name, "Digger");
        assert!(!snapshot.retainers[0].has_venture);

        let stats = source.additional_retainer_data(42, "Digger");
        assert_eq!(stats.gathering, 300);
        assert_eq!(stats.item_level, 0);
        assert_eq!(source.additional_retainer_data(42, "Nobody"), AdditionalRetainerData::default());

        assert_eq!(source.character_item_count(42, 5106), 12);
        assert_eq!(source.character_item_count(42, 1), 0);
        assert_eq!(source.retainer_item_count(7, 5106), 40);
        assert_eq!(source.retainer_item_count(8, 5106), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSnapshotSource::load(dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read snapshot"));
    }
}
