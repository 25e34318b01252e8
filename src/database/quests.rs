//! Read-only quest catalog queries.

use super::models::Quest;
use super::DbPool;
use crate::error::ApiError;

/// All quests currently flagged active. Per-user progress merging is a client
/// concern for the MVP.
pub async fn active_quests(pool: &DbPool) -> Result<Vec<Quest>, ApiError> {
    let quests = sqlx::query_as::<_, Quest>(
        "SELECT quest_id, title, quest_type, objective_type, target_value, \
                xp_reward, gp_reward, is_active \
         FROM quests WHERE is_active ORDER BY quest_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(quests)
}
