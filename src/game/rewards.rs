//! Pure reward rules: recycling deposits, distance milestones, and the
//! diamond conversion quote.
//!
//! All arithmetic on client-controlled values is checked; out-of-range input
//! is an `InvalidInput`, never a wrap or a panic.

use crate::constants::{
    DEPOSIT_BASE_GP, DEPOSIT_BASE_XP, DEPOSIT_GP_PER_POINT, DEPOSIT_XP_PER_POINT,
    DIAMOND_TO_GP_RATE, GP_PER_MILESTONE, WALK_REWARD_INTERVAL, XP_PER_MILESTONE,
};
use crate::error::ApiError;

/// XP/GP earned by a single action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reward {
    pub xp: i64,
    pub gp: i64,
}

/// Reward for depositing sorted recyclables worth an aggregated `points` score.
/// A flat check-in bonus plus a per-point rate.
pub fn deposit_reward(points: i64) -> Result<Reward, ApiError> {
    if points <= 0 {
        return Err(ApiError::InvalidInput(
            "Deposit points must be positive.".to_string(),
        ));
    }
    let xp = points
        .checked_mul(DEPOSIT_XP_PER_POINT)
        .and_then(|v| v.checked_add(DEPOSIT_BASE_XP));
    let gp = points
        .checked_mul(DEPOSIT_GP_PER_POINT)
        .and_then(|v| v.checked_add(DEPOSIT_BASE_GP));
    match (xp, gp) {
        (Some(xp), Some(gp)) => Ok(Reward { xp, gp }),
        _ => Err(ApiError::InvalidInput(
            "Deposit points out of range.".to_string(),
        )),
    }
}

/// Outcome of adding a walking delta to a cumulative distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOutcome {
    pub new_total_distance: i64,
    pub milestones_crossed: i64,
    pub reward: Reward,
}

/// Milestone reward for walking `delta` meters on top of `old_distance`.
/// Every `WALK_REWARD_INTERVAL` boundary crossed pays out once.
pub fn walk_reward(old_distance: i64, delta: i64) -> Result<WalkOutcome, ApiError> {
    if delta < 0 {
        return Err(ApiError::InvalidInput(
            "Distance delta must not be negative.".to_string(),
        ));
    }
    let new_distance = old_distance.checked_add(delta).ok_or_else(|| {
        ApiError::InvalidInput("Distance delta out of range.".to_string())
    })?;
    // The milestone count is bounded by new_distance / interval, so the
    // per-milestone multiplications below cannot overflow.
    let crossed = new_distance / WALK_REWARD_INTERVAL - old_distance / WALK_REWARD_INTERVAL;
    Ok(WalkOutcome {
        new_total_distance: new_distance,
        milestones_crossed: crossed,
        reward: Reward {
            xp: crossed * XP_PER_MILESTONE,
            gp: crossed * GP_PER_MILESTONE,
        },
    })
}

/// Green Points credited for converting `amount` diamonds, at the fixed rate.
pub fn conversion_quote(amount: i64) -> Result<i64, ApiError> {
    if amount <= 0 {
        return Err(ApiError::InvalidInput(
            "Conversion amount must be positive.".to_string(),
        ));
    }
    amount.checked_mul(DIAMOND_TO_GP_RATE).ok_or_else(|| {
        ApiError::InvalidInput("Conversion amount out of range.".to_string())
    })
}
