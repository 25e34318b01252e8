//! The social graph: friend search, requests, and the friendship relation.
//!
//! Friendships are stored as two directed rows inserted in the same
//! transaction, so the symmetric invariant ("if A has B, B has A") holds at
//! every commit point. There is no partially-accepted state to repair.

use sqlx::{Postgres, Transaction};

use super::models::{FriendProfile, PublicProfile};
use super::DbPool;
use crate::error::ApiError;
use crate::game::social::{resolve_request, RelationState, RequestOutcome};

/// Escapes LIKE metacharacters so a search term only ever matches literally.
/// Without this, a query of `%` or `_` pattern-matches against every username.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive substring search on username, excluding the requester.
pub async fn search_users(
    pool: &DbPool,
    requester_id: i64,
    query: &str,
) -> Result<Vec<PublicProfile>, ApiError> {
    let users = sqlx::query_as::<_, PublicProfile>(
        "SELECT user_id, username, current_rank, avatar_id FROM users \
         WHERE username ILIKE '%' || $1 || '%' AND user_id <> $2 \
         ORDER BY username",
    )
    .bind(escape_like(query))
    .bind(requester_id)
    .fetch_all(pool)
    .await?;
    Ok(users)
}

async fn relation_state(
    tx: &mut Transaction<'_, Postgres>,
    sender_id: i64,
    target_id: i64,
) -> Result<RelationState, ApiError> {
    let (already_friends,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM friendships WHERE user_id = $1 AND friend_id = $2)",
    )
    .bind(sender_id)
    .bind(target_id)
    .fetch_one(&mut **tx)
    .await?;
    let (request_pending,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM friend_requests WHERE sender_id = $1 AND recipient_id = $2)",
    )
    .bind(sender_id)
    .bind(target_id)
    .fetch_one(&mut **tx)
    .await?;
    let (reverse_pending,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM friend_requests WHERE sender_id = $1 AND recipient_id = $2)",
    )
    .bind(target_id)
    .bind(sender_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(RelationState {
        already_friends,
        request_pending,
        reverse_pending,
    })
}

async fn insert_friendship(
    tx: &mut Transaction<'_, Postgres>,
    a: i64,
    b: i64,
) -> Result<(), ApiError> {
    sqlx::query(
        "INSERT INTO friendships (user_id, friend_id) VALUES ($1, $2), ($2, $1) \
         ON CONFLICT DO NOTHING",
    )
    .bind(a)
    .bind(b)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Sends a friend request, auto-accepting when the reverse request is already
/// pending. The whole lifecycle step is one transaction.
pub async fn send_request(
    pool: &DbPool,
    sender_id: i64,
    target_id: i64,
) -> Result<RequestOutcome, ApiError> {
    let mut tx = pool.begin().await?;

    let target: Option<(i64,)> = sqlx::query_as("SELECT user_id FROM users WHERE user_id = $1")
        .bind(target_id)
        .fetch_optional(&mut *tx)
        .await?;
    if target.is_none() {
        return Err(ApiError::NotFound("Target user not found.".to_string()));
    }

    let state = relation_state(&mut tx, sender_id, target_id).await?;
    let outcome = resolve_request(sender_id, target_id, state)?;

    match outcome {
        RequestOutcome::Pending => {
            sqlx::query(
                "INSERT INTO friend_requests (sender_id, recipient_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(sender_id)
            .bind(target_id)
            .execute(&mut *tx)
            .await?;
        }
        RequestOutcome::MutualAccept => {
            sqlx::query("DELETE FROM friend_requests WHERE sender_id = $1 AND recipient_id = $2")
                .bind(target_id)
                .bind(sender_id)
                .execute(&mut *tx)
                .await?;
            insert_friendship(&mut tx, sender_id, target_id).await?;
        }
    }

    tx.commit().await?;
    Ok(outcome)
}

/// Accepts a pending request: consumes the pending row and inserts both sides
/// of the friendship in one transaction.
pub async fn accept_request(
    pool: &DbPool,
    acceptor_id: i64,
    sender_id: i64,
) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    let res = sqlx::query("DELETE FROM friend_requests WHERE sender_id = $1 AND recipient_id = $2")
        .bind(sender_id)
        .bind(acceptor_id)
        .execute(&mut *tx)
        .await?;
    if res.rows_affected() == 0 {
        return Err(ApiError::NotFound(
            "No pending request from that user.".to_string(),
        ));
    }

    insert_friendship(&mut tx, acceptor_id, sender_id).await?;
    tx.commit().await?;
    Ok(())
}

/// Friends expanded with profile fields, ordered by username.
pub async fn get_friends(pool: &DbPool, user_id: i64) -> Result<Vec<FriendProfile>, ApiError> {
    let friends = sqlx::query_as::<_, FriendProfile>(
        "SELECT u.user_id, u.username, u.current_rank, u.avatar_id, u.xp, u.green_points \
         FROM friendships f JOIN users u ON u.user_id = f.friend_id \
         WHERE f.user_id = $1 ORDER BY u.username",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(friends)
}

/// Pending incoming requests, oldest first.
pub async fn get_pending_requests(
    pool: &DbPool,
    user_id: i64,
) -> Result<Vec<PublicProfile>, ApiError> {
    let requests = sqlx::query_as::<_, PublicProfile>(
        "SELECT u.user_id, u.username, u.current_rank, u.avatar_id \
         FROM friend_requests r JOIN users u ON u.user_id = r.sender_id \
         WHERE r.recipient_id = $1 ORDER BY r.created_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn plain_terms_pass_through() {
        assert_eq!(escape_like("fern"), "fern");
        assert_eq!(escape_like(""), "");
    }

    #[test]
    fn wildcards_are_neutralized() {
        assert_eq!(escape_like("%"), "\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("100%_sure"), "100\\%\\_sure");
    }

    #[test]
    fn backslash_is_escaped_too() {
        assert_eq!(escape_like("\\"), "\\\\");
        assert_eq!(escape_like("\\%"), "\\\\\\%");
    }
}
