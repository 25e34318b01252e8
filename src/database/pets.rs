//! Contains all database functions related to plant pets:
//! listing, active-pet selection, and evolution.

use super::models::PlantPet;
use super::DbPool;
use crate::error::ApiError;
use crate::game::growth::{evolve_outcome, EvolveOutcome};

const PET_COLUMNS: &str = "pet_id, owner_id, name, species, rarity, growth_stage, \
     distance_required, is_active, created_at";

/// Fetches all pets owned by a user, active pet first.
pub async fn get_user_pets(pool: &DbPool, user_id: i64) -> Result<Vec<PlantPet>, ApiError> {
    let pets = sqlx::query_as::<_, PlantPet>(&format!(
        "SELECT {PET_COLUMNS} FROM plant_pets \
         WHERE owner_id = $1 ORDER BY is_active DESC, pet_id"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(pets)
}

/// Fetches the pet currently marked active, if any.
pub async fn get_active_pet(pool: &DbPool, user_id: i64) -> Result<Option<PlantPet>, ApiError> {
    let pet = sqlx::query_as::<_, PlantPet>(&format!(
        "SELECT {PET_COLUMNS} FROM plant_pets WHERE owner_id = $1 AND is_active"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(pet)
}

/// Makes `pet_id` the user's single active pet.
///
/// Both phases (clear all flags, set the new one) run in one transaction, and
/// the partial unique index on `(owner_id) WHERE is_active` backs the
/// invariant against anything that slips past this function.
pub async fn set_active(pool: &DbPool, user_id: i64, pet_id: i64) -> Result<PlantPet, ApiError> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE plant_pets SET is_active = FALSE WHERE owner_id = $1 AND is_active")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let pet = sqlx::query_as::<_, PlantPet>(&format!(
        "UPDATE plant_pets SET is_active = TRUE \
         WHERE pet_id = $1 AND owner_id = $2 \
         RETURNING {PET_COLUMNS}"
    ))
    .bind(pet_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| {
        ApiError::NotFound("Pet not found or does not belong to user.".to_string())
    })?;

    tx.commit().await?;
    Ok(pet)
}

/// Evolves a pet once the owner's banked distance clears its requirement.
///
/// Runs as one transaction with the owner's row locked: the threshold check,
/// the stage bump, and the distance deduction either all happen or none do,
/// and a failed precondition leaves every counter untouched.
pub async fn evolve(pool: &DbPool, user_id: i64, pet_id: i64) -> Result<EvolveOutcome, ApiError> {
    let mut tx = pool.begin().await?;

    let pet = sqlx::query_as::<_, PlantPet>(&format!(
        "SELECT {PET_COLUMNS} FROM plant_pets WHERE pet_id = $1 FOR UPDATE"
    ))
    .bind(pet_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::NotFound("Pet not found.".to_string()))?;

    if pet.owner_id != user_id {
        return Err(ApiError::Forbidden(
            "Pet does not belong to user.".to_string(),
        ));
    }

    let row: Option<(i64,)> =
        sqlx::query_as("SELECT distance_walked FROM users WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
    let (distance_walked,) =
        row.ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    let outcome = evolve_outcome(distance_walked, pet.growth_stage, pet.distance_required)?;

    sqlx::query(
        "UPDATE plant_pets SET growth_stage = $2, distance_required = $3 WHERE pet_id = $1",
    )
    .bind(pet_id)
    .bind(outcome.new_stage)
    .bind(outcome.new_distance_required)
    .execute(&mut *tx)
    .await?;

    // Safe unconditionally: the locked row was just checked against the old
    // requirement.
    sqlx::query("UPDATE users SET distance_walked = distance_walked - $2 WHERE user_id = $1")
        .bind(user_id)
        .bind(outcome.distance_consumed)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(outcome)
}
