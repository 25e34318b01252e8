//! Account storage and the Balance Ledger.
//!
//! Every counter mutation goes through a single atomic `UPDATE`: unconditional
//! multi-column increments for earned rewards (`apply_delta`), and conditional
//! decrements for spends, where `WHERE balance >= cost` makes the precondition
//! and the write one statement. No spend path reads a balance and writes it
//! back separately.

use sqlx::{Postgres, Transaction};

use super::models::{User, UserBalances};
use super::DbPool;
use crate::error::ApiError;
use crate::game::rewards::{conversion_quote, walk_reward, WalkOutcome};

const USER_COLUMNS: &str = "user_id, username, email, xp, green_points, diamonds, current_rank, \
     distance_walked, total_collected, motto, avatar_id, created_at";

/// Relative increments to apply to a user's counters in one statement.
/// Negative values are allowed but spendable currencies must go through the
/// conditional spend functions instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceDelta {
    pub xp: i64,
    pub gp: i64,
    pub diamonds: i64,
    pub distance: i64,
    pub collected: i64,
}

/// Creates a user with all counters zeroed. Duplicate username or email is a
/// `Conflict`.
pub async fn create_user(
    pool: &DbPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<i64, ApiError> {
    let row: Result<(i64,), sqlx::Error> = sqlx::query_as(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING user_id",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await;

    match row {
        Ok((user_id,)) => Ok(user_id),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(ApiError::Conflict("User already exists.".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Login lookup: the only query allowed to read the password hash.
pub async fn find_credentials_by_email(
    pool: &DbPool,
    email: &str,
) -> Result<Option<(i64, String)>, ApiError> {
    let row: Option<(i64, String)> =
        sqlx::query_as("SELECT user_id, password_hash FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
    Ok(row)
}

pub async fn get_user(pool: &DbPool, user_id: i64) -> Result<User, ApiError> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))
}

/// Partial profile update; `None` fields keep their current value.
pub async fn update_profile(
    pool: &DbPool,
    user_id: i64,
    username: Option<&str>,
    email: Option<&str>,
    motto: Option<&str>,
    avatar_id: Option<&str>,
) -> Result<User, ApiError> {
    let row = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET \
             username = COALESCE($2, username), \
             email = COALESCE($3, email), \
             motto = COALESCE($4, motto), \
             avatar_id = COALESCE($5, avatar_id) \
         WHERE user_id = $1 \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(user_id)
    .bind(username)
    .bind(email)
    .bind(motto)
    .bind(avatar_id)
    .fetch_optional(pool)
    .await;

    match row {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(ApiError::NotFound("User not found.".to_string())),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(ApiError::Conflict(
            "Username or email already taken.".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Applies a `BalanceDelta` as one atomic multi-column increment and returns
/// the updated counters. Generic over the executor so it can run standalone or
/// inside a transaction.
pub async fn apply_delta<'e, E>(
    executor: E,
    user_id: i64,
    delta: BalanceDelta,
) -> Result<UserBalances, ApiError>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, UserBalances>(
        "UPDATE users SET \
             xp = xp + $2, \
             green_points = green_points + $3, \
             diamonds = diamonds + $4, \
             distance_walked = distance_walked + $5, \
             total_collected = total_collected + $6 \
         WHERE user_id = $1 \
         RETURNING xp, green_points, diamonds, distance_walked, total_collected",
    )
    .bind(user_id)
    .bind(delta.xp)
    .bind(delta.gp)
    .bind(delta.diamonds)
    .bind(delta.distance)
    .bind(delta.collected)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))
}

/// Spends Green Points inside an existing transaction. The balance check and
/// the decrement are one conditional statement; zero rows affected means the
/// balance was short. The caller must already have established that the user
/// exists.
pub async fn spend_green_points(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    cost: i64,
) -> Result<(), ApiError> {
    let res = sqlx::query(
        "UPDATE users SET green_points = green_points - $2 \
         WHERE user_id = $1 AND green_points >= $2",
    )
    .bind(user_id)
    .bind(cost)
    .execute(&mut **tx)
    .await?;
    if res.rows_affected() == 1 {
        Ok(())
    } else {
        Err(ApiError::InsufficientFunds(format!(
            "Insufficient Green Points. Required: {cost} GP."
        )))
    }
}

/// Converts premium currency to Green Points at the fixed rate, as a single
/// conditional update. Returns the GP credited.
pub async fn convert_diamonds(pool: &DbPool, user_id: i64, amount: i64) -> Result<i64, ApiError> {
    let gp_earned = conversion_quote(amount)?;
    let res = sqlx::query(
        "UPDATE users SET diamonds = diamonds - $2, green_points = green_points + $3 \
         WHERE user_id = $1 AND diamonds >= $2",
    )
    .bind(user_id)
    .bind(amount)
    .bind(gp_earned)
    .execute(pool)
    .await?;
    if res.rows_affected() == 1 {
        return Ok(gp_earned);
    }
    // Zero rows: user missing or balance short. Users are never deleted, so a
    // follow-up existence check cannot race.
    let exists: Option<(i64,)> = sqlx::query_as("SELECT user_id FROM users WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    match exists {
        Some(_) => Err(ApiError::InsufficientFunds(format!(
            "Insufficient Diamonds. Required: {amount}."
        ))),
        None => Err(ApiError::NotFound("User not found.".to_string())),
    }
}

/// Stand-in for a real payment integration: credits diamonds directly.
pub async fn top_up_diamonds(
    pool: &DbPool,
    user_id: i64,
    amount: i64,
) -> Result<UserBalances, ApiError> {
    if amount <= 0 {
        return Err(ApiError::InvalidInput(
            "Top-up amount must be positive.".to_string(),
        ));
    }
    apply_delta(
        pool,
        user_id,
        BalanceDelta {
            diamonds: amount,
            ..Default::default()
        },
    )
    .await
}

/// Adds a walking delta to the user's total and pays out any milestone
/// rewards. The distance row is locked for the duration so two concurrent
/// updates cannot both claim the same milestone.
pub async fn record_distance(
    pool: &DbPool,
    user_id: i64,
    delta: i64,
) -> Result<WalkOutcome, ApiError> {
    let mut tx = pool.begin().await?;

    let row: Option<(i64,)> =
        sqlx::query_as("SELECT distance_walked FROM users WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
    let (old_distance,) = row.ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    let outcome = walk_reward(old_distance, delta)?;
    apply_delta(
        &mut *tx,
        user_id,
        BalanceDelta {
            xp: outcome.reward.xp,
            gp: outcome.reward.gp,
            distance: delta,
            ..Default::default()
        },
    )
    .await?;

    tx.commit().await?;
    Ok(outcome)
}
