use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use questlog::config::Config;
use questlog::store::QuestStore;

mod cli;

use cli::list::ListFilter;

#[derive(Parser)]
#[command(name = "questlog")]
#[command(about = "Questlog - track quests, claim them for XP, level up")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.questlog/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the quest store (overrides the config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new active quest
    Create {
        /// Quest title
        title: String,

        /// Longer description
        #[arg(short, long, default_value = "")]
        desc: String,

        /// XP awarded when the quest is claimed (required)
        #[arg(short, long)]
        xp: u32,
    },

    /// Cancel an active quest
    Cancel { id: u32 },

    /// Claim an active quest and collect its XP
    Claim { id: u32 },

    /// Move a completed quest back to the active list
    Unclaim { id: u32 },

    /// Delete a completed quest (its XP is lost)
    Delete { id: u32 },

    /// List quests
    List {
        /// Only show active quests
        #[arg(long, conflicts_with = "completed")]
        active: bool,

        /// Only show completed quests
        #[arg(long)]
        completed: bool,
    },

    /// Show level and XP progress
    Status,

    /// Initialize a new ~/.questlog/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load_or_default(cli.config.as_deref())?;

    // Initialize logging
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.settings.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Status);

    if let Commands::Init { force } = command {
        return cli::init::init_command(cli.config, force).await;
    }

    if let Some(dir) = cli.data_dir {
        config.storage.dir = Some(dir);
    }
    let store = QuestStore::open(Arc::new(config.file_storage()), config.storage.key.clone());
    let quests = store.wait_loaded().await;

    let result = match command {
        Commands::Create { title, desc, xp } => cli::quest::create_command(quests, title, desc, xp),
        Commands::Cancel { id } => cli::quest::cancel_command(quests, id),
        Commands::Claim { id } => cli::quest::claim_command(quests, id),
        Commands::Unclaim { id } => cli::quest::unclaim_command(quests, id),
        Commands::Delete { id } => cli::quest::delete_command(quests, id),
        Commands::List { active, completed } => {
            let filter = if active {
                ListFilter::Active
            } else if completed {
                ListFilter::Completed
            } else {
                ListFilter::All
            };
            cli::list::list_command(quests, filter)
        }
        Commands::Status => cli::status::status_command(quests),
        Commands::Init { .. } => Ok(()),
    };

    // Let the write spawned by a mutating command land before the process exits
    store.flush().await;

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_xp() {
        assert!(Cli::try_parse_from(["questlog", "create", "Walk"]).is_err());

        let cli = Cli::try_parse_from(["questlog", "create", "Walk", "--xp", "20"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Create { xp: 20, .. })));
    }
}
