//! Init command implementation

use anyhow::{bail, Result};
use std::path::PathBuf;

use questlog::config::Config;

/// Default configuration content for questlog init
pub const DEFAULT_CONFIG: &str = r#"# Questlog Configuration
# ======================

# ============================================================================
# STORAGE - Where quests are saved
# ============================================================================
#
# Available options:
#   dir - Directory for the quest store (default: ~/.questlog/data)
#   key - Name of the stored blob, saved as <dir>/<key>.json (default: "quest-store")

[storage]
key = "quest-store"
# dir = "/path/to/quests"

# ============================================================================
# SETTINGS - Global configuration options
# ============================================================================
#
# Available options:
#   log_level - Log filter when RUST_LOG is unset (default: "info")

[settings]
log_level = "info"
"#;

/// Write a default configuration file
pub async fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
