// Central constants for leveling, rewards, and the economy.
// These must stay in sync with the mobile client's progression display.

/// XP required to clear level 1.
pub const BASE_LEVEL_XP: i64 = 1000;
/// Each level's XP requirement is the previous one times this factor.
pub const LEVEL_XP_MULTIPLIER: f64 = 1.75;

/// Distance interval (meters) that triggers a walking reward.
pub const WALK_REWARD_INTERVAL: i64 = 1000;
pub const XP_PER_MILESTONE: i64 = 20;
pub const GP_PER_MILESTONE: i64 = 40;

/// Flat check-in reward granted for any accepted recycling deposit.
pub const DEPOSIT_BASE_XP: i64 = 10;
pub const DEPOSIT_BASE_GP: i64 = 20;
/// Per-point rates for the aggregated deposit score.
pub const DEPOSIT_XP_PER_POINT: i64 = 5;
pub const DEPOSIT_GP_PER_POINT: i64 = 10;

/// Green Points credited per converted diamond.
pub const DIAMOND_TO_GP_RATE: i64 = 100;

/// A pet's next growth stage costs 50% more distance than the last.
pub const PET_GROWTH_FACTOR: f64 = 1.5;

/// Leaderboard page size when the client does not ask for one.
pub const LEADERBOARD_DEFAULT_LIMIT: i64 = 50;
pub const LEADERBOARD_MAX_LIMIT: i64 = 100;
