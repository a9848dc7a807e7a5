//! Core domain types for Questlog

mod quest;

pub use quest::{Quest, QuestArgs, QuestError, QuestId};
