//! Pure decision logic for the friend-request lifecycle.
//!
//! The database layer gathers the current relationship state between two users
//! and this function decides what a new request means: queue it, auto-accept a
//! mutual pair, or reject it.

use crate::error::ApiError;

/// Relationship state between sender and target at decision time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationState {
    pub already_friends: bool,
    /// sender → target request already pending.
    pub request_pending: bool,
    /// target → sender request already pending.
    pub reverse_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Queue the request on the target's pending set.
    Pending,
    /// Both parties requested each other: form the friendship immediately.
    MutualAccept,
}

impl RequestOutcome {
    pub fn as_status(&self) -> &'static str {
        match self {
            RequestOutcome::Pending => "pending",
            RequestOutcome::MutualAccept => "accepted",
        }
    }
}

pub fn resolve_request(
    sender_id: i64,
    target_id: i64,
    state: RelationState,
) -> Result<RequestOutcome, ApiError> {
    if sender_id == target_id {
        return Err(ApiError::InvalidInput(
            "Cannot send a friend request to yourself.".to_string(),
        ));
    }
    if state.already_friends {
        return Err(ApiError::Conflict("Already friends.".to_string()));
    }
    if state.request_pending {
        return Err(ApiError::Conflict("Request already sent.".to_string()));
    }
    if state.reverse_pending {
        return Ok(RequestOutcome::MutualAccept);
    }
    Ok(RequestOutcome::Pending)
}
