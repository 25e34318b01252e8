//! Pure pet evolution rule.
//!
//! A pet evolves once the owner's banked distance clears the pet's current
//! requirement. The evolution consumes exactly the old requirement, so excess
//! distance carries toward the next stage instead of being reset.

use crate::constants::PET_GROWTH_FACTOR;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolveOutcome {
    pub new_stage: i32,
    pub new_distance_required: i64,
    /// Distance subtracted from the owner's total: the old requirement.
    pub distance_consumed: i64,
}

pub fn evolve_outcome(
    owner_distance: i64,
    growth_stage: i32,
    distance_required: i64,
) -> Result<EvolveOutcome, ApiError> {
    if owner_distance < distance_required {
        return Err(ApiError::InvalidState(format!(
            "Growth incomplete. Needs {}m more to evolve.",
            distance_required - owner_distance
        )));
    }
    Ok(EvolveOutcome {
        new_stage: growth_stage + 1,
        new_distance_required: (distance_required as f64 * PET_GROWTH_FACTOR).floor() as i64,
        distance_consumed: distance_required,
    })
}
