//! This module contains all database queries related to leaderboards.

use super::models::LeaderboardEntry;
use super::DbPool;
use crate::constants::{LEADERBOARD_DEFAULT_LIMIT, LEADERBOARD_MAX_LIMIT};
use crate::error::ApiError;

/// Which counter a leaderboard ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderboardCategory {
    #[default]
    GreenPoints,
    Experience,
}

impl LeaderboardCategory {
    /// Parses the client's `category` query value. Unknown values fall back to
    /// Green Points, matching the original client contract.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("XP") => LeaderboardCategory::Experience,
            _ => LeaderboardCategory::GreenPoints,
        }
    }
}

/// Clamp a requested page size to something the database should serve.
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(LEADERBOARD_DEFAULT_LIMIT)
        .clamp(1, LEADERBOARD_MAX_LIMIT)
}

/// Fetches the top users for a category, highest score first.
pub async fn top_users(
    pool: &DbPool,
    category: LeaderboardCategory,
    limit: i64,
) -> Result<Vec<LeaderboardEntry>, ApiError> {
    let sql = match category {
        LeaderboardCategory::GreenPoints => {
            "SELECT user_id, username, current_rank, avatar_id, green_points AS score \
             FROM users ORDER BY green_points DESC LIMIT $1"
        }
        LeaderboardCategory::Experience => {
            "SELECT user_id, username, current_rank, avatar_id, xp AS score \
             FROM users ORDER BY xp DESC LIMIT $1"
        }
    };
    let entries = sqlx::query_as::<_, LeaderboardEntry>(sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(entries)
}
