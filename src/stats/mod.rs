//! Leveling stats for Questlog
//!
//! Maps the XP of completed quests onto a level progression curve.
//!
//! # Usage
//!
//! ```
//! use questlog::stats::PlayerStats;
//!
//! let stats = PlayerStats::new(150);
//! assert_eq!(stats.level, 1);
//! assert_eq!(stats.xp_until_next_level, 56);
//! ```

mod levels;

pub use levels::{current_level, total_xp_for_level, LevelCurve, PlayerStats};
