//! Configuration loading and management

mod io;
mod settings;

pub use settings::{Settings, StorageSettings};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::storage::FileStorage;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the quest store is persisted
    #[serde(default)]
    pub storage: StorageSettings,

    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Directory holding the persisted quest store
    ///
    /// Falls back to `~/.questlog/data/` when no directory is configured.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .dir
            .clone()
            .unwrap_or_else(FileStorage::default_dir)
    }

    /// File storage rooted at the configured data directory
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(self.data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [storage]
            dir = "/tmp/quests"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir(), PathBuf::from("/tmp/quests"));
        assert_eq!(config.storage.key, "quest-store");
        assert_eq!(config.settings.log_level, "info");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.data_dir().ends_with("data"));
    }
}
