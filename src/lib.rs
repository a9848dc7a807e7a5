//! Questlog - quests, XP and levels
//!
//! Questlog keeps a list of quests (tasks with an XP reward). Claiming a quest
//! moves it to the completed list and adds its XP to the player's total, which
//! drives a geometric level curve.
//!
//! ## Building blocks
//!
//! 1. **Leveling** ([`stats`]): closed-form mapping between total XP and level.
//! 2. **Quest store** ([`store`]): active/completed quests, derived stats,
//!    change listeners and fire-and-forget persistence to a [`storage::Storage`].

pub mod config;
pub mod domain;
pub mod stats;
pub mod storage;
pub mod store;

pub use domain::*;
