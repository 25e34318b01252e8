//! Contains the business logic for player leveling.

use crate::constants::{BASE_LEVEL_XP, LEVEL_XP_MULTIPLIER};

/// Where a cumulative XP total lands in the level curve.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    pub level: i32,
    pub xp_into_level: i64,
    pub xp_needed_this_level: i64,
}

impl LevelData {
    /// Fraction of the current level already cleared, in `[0, 1)`.
    pub fn progress_fraction(&self) -> f64 {
        // xp_needed_this_level is always >= BASE_LEVEL_XP, so never zero.
        self.xp_into_level as f64 / self.xp_needed_this_level as f64
    }
}

/// Maps cumulative experience to (level, progress-within-level).
///
/// Level 1 costs `BASE_LEVEL_XP`; every subsequent level costs the previous
/// requirement times `LEVEL_XP_MULTIPLIER`, floored for comparison. The loop
/// terminates for any finite xp because the multiplier is > 1.
pub fn level_of(xp: i64) -> LevelData {
    let xp = xp.max(0);
    let mut level = 1;
    let mut cumulative: i64 = 0;
    let mut requirement: f64 = BASE_LEVEL_XP as f64;

    while xp >= cumulative + requirement.floor() as i64 {
        cumulative += requirement.floor() as i64;
        requirement *= LEVEL_XP_MULTIPLIER;
        level += 1;
    }

    LevelData {
        level,
        xp_into_level: xp - cumulative,
        xp_needed_this_level: requirement.floor() as i64,
    }
}
