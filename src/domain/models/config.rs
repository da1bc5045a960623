use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration for the `arc` binary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where the configuration model is persisted
    #[serde(default)]
    pub storage: StorageConfig,

    /// Files standing in for the live game collaborators
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Planner settings
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for log files; stderr only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Rotation for file logs: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    /// Path to the persisted configuration model (JSON)
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
}

fn default_state_path() -> PathBuf {
    PathBuf::from(".arc/state.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
        }
    }
}

/// Input file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SourcesConfig {
    /// Exported character/retainer facts and inventory counts (JSON)
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Venture catalog (YAML or JSON)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(".arc/snapshot.json")
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(".arc/catalog.yaml")
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            catalog_path: default_catalog_path(),
        }
    }
}

/// Planner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Venture assigned when no list has anything left to do
    #[serde(default = "default_filler_venture_id")]
    pub filler_venture_id: u32,
}

/// Quick Venture.
pub const QUICK_VENTURE_ID: u32 = 395;

const fn default_filler_venture_id() -> u32 {
    QUICK_VENTURE_ID
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            filler_venture_id: default_filler_venture_id(),
        }
    }
}
