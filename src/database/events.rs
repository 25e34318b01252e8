//! Community events: listing, joining, and cancelling registration.

use super::models::CommunityEvent;
use super::DbPool;
use crate::error::ApiError;

const EVENT_SELECT: &str = "SELECT e.event_id, e.title, e.description, e.organizer, e.address, \
     e.event_date, e.max_participants, \
     (SELECT COUNT(*) FROM event_participants p WHERE p.event_id = e.event_id) AS participant_count \
     FROM community_events e";

/// All events from today onward, soonest first.
pub async fn upcoming_events(pool: &DbPool) -> Result<Vec<CommunityEvent>, ApiError> {
    let events = sqlx::query_as::<_, CommunityEvent>(&format!(
        "{EVENT_SELECT} WHERE e.event_date >= now() ORDER BY e.event_date"
    ))
    .fetch_all(pool)
    .await?;
    Ok(events)
}

async fn get_event(pool: &DbPool, event_id: i64) -> Result<CommunityEvent, ApiError> {
    sqlx::query_as::<_, CommunityEvent>(&format!("{EVENT_SELECT} WHERE e.event_id = $1"))
        .bind(event_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found.".to_string()))
}

/// Registers the user for an event. The event row is locked while the
/// capacity check runs, so the participant count can never pass the cap.
pub async fn join_event(
    pool: &DbPool,
    user_id: i64,
    event_id: i64,
) -> Result<CommunityEvent, ApiError> {
    let mut tx = pool.begin().await?;

    let row: Option<(i32,)> = sqlx::query_as(
        "SELECT max_participants FROM community_events WHERE event_id = $1 FOR UPDATE",
    )
    .bind(event_id)
    .fetch_optional(&mut *tx)
    .await?;
    let (max_participants,) =
        row.ok_or_else(|| ApiError::NotFound("Event not found.".to_string()))?;

    let (already_joined,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM event_participants WHERE event_id = $1 AND user_id = $2)",
    )
    .bind(event_id)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;
    if already_joined {
        return Err(ApiError::Conflict(
            "You are already registered for this event.".to_string(),
        ));
    }

    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM event_participants WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await?;
    if count >= max_participants as i64 {
        return Err(ApiError::InvalidState("Event is full!".to_string()));
    }

    sqlx::query("INSERT INTO event_participants (event_id, user_id) VALUES ($1, $2)")
        .bind(event_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    get_event(pool, event_id).await
}

/// Cancels the user's registration.
pub async fn cancel_join(
    pool: &DbPool,
    user_id: i64,
    event_id: i64,
) -> Result<CommunityEvent, ApiError> {
    // Existence first so a missing event is NotFound, not "not registered".
    get_event(pool, event_id).await?;

    let res = sqlx::query("DELETE FROM event_participants WHERE event_id = $1 AND user_id = $2")
        .bind(event_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if res.rows_affected() == 0 {
        return Err(ApiError::InvalidState(
            "You are not currently registered for this event.".to_string(),
        ));
    }

    get_event(pool, event_id).await
}
