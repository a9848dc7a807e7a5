//! Quest domain types

use serde::{Deserialize, Serialize};

/// Unique identifier for a quest
pub type QuestId = u32;

/// A user task with an XP reward
///
/// Quests are never mutated after creation. They only move between the
/// active and completed collections of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    pub desc: String,
    pub xp: u32,
}

impl Quest {
    /// Build a quest from user-supplied arguments and a freshly allocated id
    pub fn from_args(id: QuestId, args: QuestArgs) -> Self {
        Self {
            id,
            title: args.title,
            desc: args.desc,
            xp: args.xp,
        }
    }
}

/// User-supplied payload for creating a quest (a quest without an id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestArgs {
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub xp: u32,
}

impl QuestArgs {
    pub fn new(title: impl Into<String>, desc: impl Into<String>, xp: u32) -> Self {
        Self {
            title: title.into(),
            desc: desc.into(),
            xp,
        }
    }

    /// Check the arguments against the store's create policy.
    ///
    /// The title must contain something other than whitespace. XP is
    /// unsigned, so there is nothing to check there.
    pub fn validate(&self) -> Result<(), QuestError> {
        if self.title.trim().is_empty() {
            return Err(QuestError::EmptyTitle);
        }
        Ok(())
    }
}

/// Errors returned to callers of quest commands
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestError {
    #[error("Quest title cannot be empty")]
    EmptyTitle,
}
