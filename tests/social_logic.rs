use ecoverse_api::error::ApiError;
use ecoverse_api::game::social::{resolve_request, RelationState, RequestOutcome};

#[test]
fn request_to_self_is_rejected() {
    let err = resolve_request(7, 7, RelationState::default()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn fresh_request_queues_as_pending() {
    let outcome = resolve_request(1, 2, RelationState::default()).unwrap();
    assert_eq!(outcome, RequestOutcome::Pending);
    assert_eq!(outcome.as_status(), "pending");
}

#[test]
fn existing_friendship_is_a_conflict() {
    let state = RelationState {
        already_friends: true,
        ..Default::default()
    };
    assert!(matches!(
        resolve_request(1, 2, state),
        Err(ApiError::Conflict(_))
    ));
}

#[test]
fn duplicate_request_is_a_conflict() {
    let state = RelationState {
        request_pending: true,
        ..Default::default()
    };
    assert!(matches!(
        resolve_request(1, 2, state),
        Err(ApiError::Conflict(_))
    ));
}

#[test]
fn mutual_requests_auto_accept() {
    // B already asked A; A now asking B forms the friendship immediately.
    let state = RelationState {
        reverse_pending: true,
        ..Default::default()
    };
    let outcome = resolve_request(1, 2, state).unwrap();
    assert_eq!(outcome, RequestOutcome::MutualAccept);
    assert_eq!(outcome.as_status(), "accepted");
}

#[test]
fn friendship_takes_precedence_over_stale_reverse_request() {
    // A stale pending row alongside an accepted friendship must still read as
    // a conflict, not a second acceptance.
    let state = RelationState {
        already_friends: true,
        reverse_pending: true,
        ..Default::default()
    };
    assert!(matches!(
        resolve_request(1, 2, state),
        Err(ApiError::Conflict(_))
    ));
}
