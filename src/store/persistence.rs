//! Wire format of the persisted quest store

use serde::{Deserialize, Serialize};

use crate::storage::{Storage, StorageError};
use crate::Quest;

/// Default key the store is persisted under
pub const DEFAULT_STORE_KEY: &str = "quest-store";

/// Persisted snapshot of both quest collections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedQuestStore {
    pub active_quests: Vec<Quest>,
    pub completed_quests: Vec<Quest>,
}

impl SerializedQuestStore {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Failure while reading the persisted store
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Malformed quest store: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read and decode the snapshot under `key`, `None` when nothing is stored
pub(crate) async fn read_snapshot(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<SerializedQuestStore>, LoadError> {
    let Some(json) = storage.read(key).await? else {
        return Ok(None);
    };

    // An empty value counts as nothing stored
    if json.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(SerializedQuestStore::from_json(&json)?))
}
