use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("State path cannot be empty")]
    EmptyStatePath,

    #[error("{0} path cannot be empty")]
    EmptySourcePath(&'static str),

    #[error("Invalid filler_venture_id: 0 is not a venture")]
    InvalidFillerVenture,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .arc/config.yaml (project config)
    /// 3. .arc/local.yaml (local overrides, optional)
    /// 4. Environment variables (ARC_* prefix, `__` separates sections)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".arc/config.yaml"))
            .merge(Yaml::file(".arc/local.yaml"))
            .merge(Env::prefixed("ARC_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        if config.storage.state_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyStatePath);
        }
        if config.sources.snapshot_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptySourcePath("Snapshot"));
        }
        if config.sources.catalog_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptySourcePath("Catalog"));
        }

        if config.planner.filler_venture_id == 0 {
            return Err(ConfigError::InvalidFillerVenture);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::QUICK_VENTURE_ID;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.state_path, PathBuf::from(".arc/state.json"));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.planner.filler_venture_id, QUICK_VENTURE_ID);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
storage:
  state_path: /custom/state.json
sources:
  catalog_path: data/catalog.json
logging:
  level: debug
  format: json
  rotation: hourly
planner:
  filler_venture_id: 12
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.storage.state_path, PathBuf::from("/custom/state.json"));
        assert_eq!(config.sources.catalog_path, PathBuf::from("data/catalog.json"));
        assert_eq!(
            config.sources.snapshot_path,
            PathBuf::from(".arc/snapshot.json"),
            "unset fields keep their defaults"
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotation, "hourly");
        assert_eq!(config.planner.filler_venture_id, 12);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidLogFormat(_)
        ));
    }

    #[test]
    fn test_validate_invalid_rotation() {
        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidLogRotation(_)
        ));
    }

    #[test]
    fn test_validate_empty_paths() {
        let mut config = Config::default();
        config.storage.state_path = PathBuf::new();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyStatePath
        ));

        let mut config = Config::default();
        config.sources.catalog_path = PathBuf::new();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptySourcePath("Catalog")
        ));
    }

    #[test]
    fn test_validate_zero_filler_venture() {
        let mut config = Config::default();
        config.planner.filler_venture_id = 0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidFillerVenture
        ));
    }

    #[test]
    fn test_env_override() {
        temp_env::with_vars(
            [
                ("ARC_LOGGING__LEVEL", Some("debug")),
                ("ARC_PLANNER__FILLER_VENTURE_ID", Some("7")),
            ],
            || {
                let config: Config = Figment::new()
                    .merge(Serialized::defaults(Config::default()))
                    .merge(Env::prefixed("ARC_").split("__"))
                    .extract()
                    .unwrap();

                assert_eq!(config.logging.level, "debug");
                assert_eq!(config.planner.filler_venture_id, 7);
            },
        );
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  format: json").unwrap();
        file.flush().unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");

        let mut bad = NamedTempFile::new().unwrap();
        writeln!(bad, "planner:\n  filler_venture_id: 0").unwrap();
        bad.flush().unwrap();
        assert!(ConfigLoader::load_from_file(bad.path()).is_err());
    }

    #[test]
    fn test_hierarchical_merging() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(
            base_file,
            "logging:\n  level: info\n  format: json\nstorage:\n  state_path: base.json"
        )
        .unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "logging:\n  level: debug").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(
            config.logging.level, "debug",
            "Override should win for nested fields"
        );
        assert_eq!(
            config.logging.format, "json",
            "Base value should persist when not overridden"
        );
        assert_eq!(config.storage.state_path, PathBuf::from("base.json"));
    }
}
