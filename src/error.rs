//! Error taxonomy shared by every operation in the crate.
//!
//! Core operations return `Result<T, ApiError>`; the boundary layer maps each
//! kind to exactly one HTTP status. `Internal` wraps persistence and other
//! unexpected failures: it is logged with operation context where it occurs
//! and surfaced to the caller as a generic message, never with detail.

use hyper::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed, missing, or out-of-range request fields.
    #[error("{0}")]
    InvalidInput(String),

    /// The entity exists but the action's state precondition does not hold
    /// (pet growth incomplete, event full, not registered).
    #[error("{0}")]
    InvalidState(String),

    /// Referenced entity absent.
    #[error("{0}")]
    NotFound(String),

    /// Entity exists but the caller does not own it.
    #[error("{0}")]
    Forbidden(String),

    /// The action would violate a uniqueness or relationship invariant.
    #[error("{0}")]
    Conflict(String),

    /// Balance precondition failed for a spendable currency.
    #[error("{0}")]
    InsufficientFunds(String),

    /// Missing or invalid credential.
    #[error("{0}")]
    Unauthorized(String),

    /// Persistence or other unexpected failure.
    #[error("internal error: {0}")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_)
            | ApiError::InvalidState(_)
            | ApiError::InsufficientFunds(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to put in a response body. Internal detail stays in logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "Server error.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_is_deterministic() {
        assert_eq!(
            ApiError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidState("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InsufficientFunds("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn internal_detail_is_not_leaked() {
        let err = ApiError::Internal(anyhow::anyhow!("connection refused to db at 10.0.0.3"));
        assert_eq!(err.public_message(), "Server error.");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
