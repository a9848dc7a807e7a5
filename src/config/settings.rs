//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_STORE_KEY;

/// Persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Data directory (default: ~/.questlog/data)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Key the quest store is saved under
    #[serde(default = "default_store_key")]
    pub key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_store_key(),
        }
    }
}

fn default_store_key() -> String {
    DEFAULT_STORE_KEY.to_string()
}

/// General settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Log filter used when RUST_LOG is unset and --verbose is not given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
