//! XP and Level system
//!
//! Levels follow a geometric curve: every level needs `factor` times the XP
//! of the previous one, starting at `base_xp` for the first level. The level
//! for a given XP total is the floored closed-form inverse of the cumulative
//! geometric sum.

/// Geometric level progression
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelCurve {
    /// Growth rate of the per-level XP requirement
    pub factor: f64,
    /// XP required for the first level
    pub base_xp: f64,
}

impl LevelCurve {
    /// The curve used by the quest store
    pub const STANDARD: LevelCurve = LevelCurve {
        factor: 1.05,
        base_xp: 100.0,
    };

    fn log(&self, x: f64) -> f64 {
        x.ln() / self.factor.ln()
    }

    /// Level reached with `xp` total experience (level 0 at 0 XP)
    pub fn current_level(&self, xp: u64) -> u32 {
        let level = self
            .log(1.0 - (1.0 - self.factor) * (xp as f64 / self.base_xp))
            .floor();
        level.max(0.0) as u32
    }

    /// Cumulative XP at which `current_level` first reports `level`
    ///
    /// The continuous estimate can land up to two units below the integer
    /// boundary, so the next two values are probed. This only holds for the
    /// standard factor; other factors must re-derive the lookahead.
    pub fn total_xp_for_level(&self, level: u32) -> u64 {
        let raw = (self.base_xp * ((1.0 - self.factor.powf(level as f64)) / (1.0 - self.factor)))
            .ceil()
            .max(0.0) as u64;

        self.adjust(raw)
    }

    fn adjust(&self, xp_requirement: u64) -> u64 {
        let n0 = self.current_level(xp_requirement);

        let one_up = xp_requirement.saturating_add(1);
        let two_up = xp_requirement.saturating_add(2);

        if self.current_level(one_up) != n0 {
            one_up
        } else if self.current_level(two_up) != n0 {
            two_up
        } else {
            xp_requirement
        }
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Level for `xp` on the standard curve
pub fn current_level(xp: u64) -> u32 {
    LevelCurve::STANDARD.current_level(xp)
}

/// Cumulative XP threshold of `level` on the standard curve
pub fn total_xp_for_level(level: u32) -> u64 {
    LevelCurve::STANDARD.total_xp_for_level(level)
}

/// Leveling stats derived from a total XP value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub total_xp: u64,
    pub level: u32,
    /// XP still missing to reach the next level
    pub xp_until_next_level: u64,
    /// Width of the current level's XP band
    pub level_xp_requirement: u64,
}

impl PlayerStats {
    /// Derive stats for `total_xp` on the standard curve
    pub fn new(total_xp: u64) -> Self {
        Self::with_curve(&LevelCurve::STANDARD, total_xp)
    }

    pub fn with_curve(curve: &LevelCurve, total_xp: u64) -> Self {
        let level = curve.current_level(total_xp);
        let next_level_xp = curve.total_xp_for_level(level + 1);

        Self {
            total_xp,
            level,
            xp_until_next_level: next_level_xp.saturating_sub(total_xp),
            level_xp_requirement: next_level_xp.saturating_sub(curve.total_xp_for_level(level)),
        }
    }

    /// Cumulative XP needed for the next level
    pub fn next_level_xp(&self) -> u64 {
        self.total_xp + self.xp_until_next_level
    }

    /// XP earned since the start of the current level
    pub fn xp_into_level(&self) -> u64 {
        self.level_xp_requirement.saturating_sub(self.xp_until_next_level)
    }

    /// Calculate progress percentage to next level (0.0 - 1.0)
    pub fn progress_to_next(&self) -> f32 {
        if self.level_xp_requirement == 0 {
            1.0
        } else {
            self.xp_into_level() as f32 / self.level_xp_requirement as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(total_xp_for_level(0), 0);
        assert_eq!(total_xp_for_level(1), 100);
        assert_eq!(current_level(0), 0);
        assert_eq!(current_level(99), 0);
        assert_eq!(current_level(100), 1);
    }

    #[test]
    fn test_adjustment_repairs_level_two_boundary() {
        // The continuous estimate is 205, but the inverse only flips at 206
        assert_eq!(total_xp_for_level(2), 206);
        assert_eq!(current_level(205), 1);
        assert_eq!(current_level(206), 2);
        assert_eq!(total_xp_for_level(3), 316);
        assert_eq!(total_xp_for_level(10), 1258);
    }

    #[test]
    fn test_boundary_round_trip() {
        for level in 0..=150 {
            let threshold = total_xp_for_level(level);
            assert_eq!(current_level(threshold), level, "threshold of level {level}");
            if level >= 1 {
                assert_eq!(
                    current_level(threshold - 1),
                    level - 1,
                    "just below level {level}"
                );
            }
        }
    }

    #[test]
    fn test_huge_levels_saturate() {
        assert_eq!(total_xp_for_level(u32::MAX), u64::MAX);
        assert!(total_xp_for_level(1000) >= total_xp_for_level(999));
    }

    #[test]
    fn test_level_monotonic() {
        let mut previous = current_level(0);
        for xp in 1..=20_000 {
            let level = current_level(xp);
            assert!(level >= previous, "level dropped at {xp} XP");
            previous = level;
        }
    }

    #[test]
    fn test_player_stats_at_zero() {
        let stats = PlayerStats::new(0);
        assert_eq!(stats.level, 0);
        assert_eq!(stats.xp_until_next_level, 100);
        assert_eq!(stats.level_xp_requirement, 100);
        assert_eq!(stats.progress_to_next(), 0.0);
    }

    #[test]
    fn test_player_stats_progress() {
        let stats = PlayerStats::new(153); // Level 1 band is 100..206
        assert_eq!(stats.level, 1);
        assert_eq!(stats.xp_until_next_level, 53);
        assert_eq!(stats.level_xp_requirement, 106);
        assert_eq!(stats.next_level_xp(), 206);
        assert_eq!(stats.xp_into_level(), 53);
        assert!((stats.progress_to_next() - 0.5).abs() < 0.01);
    }
}
