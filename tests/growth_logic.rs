use ecoverse_api::error::ApiError;
use ecoverse_api::game::growth::evolve_outcome;

#[test]
fn evolve_with_banked_excess_distance() {
    // Stage 1 pet needing 1000m, owner has walked 1200m.
    let outcome = evolve_outcome(1200, 1, 1000).unwrap();
    assert_eq!(outcome.new_stage, 2);
    assert_eq!(outcome.new_distance_required, 1500);
    // Only the old requirement is consumed: 1200 - 1000 leaves 200m banked.
    assert_eq!(outcome.distance_consumed, 1000);
}

#[test]
fn evolve_at_exact_threshold() {
    let outcome = evolve_outcome(1000, 1, 1000).unwrap();
    assert_eq!(outcome.new_stage, 2);
    assert_eq!(outcome.distance_consumed, 1000);
}

#[test]
fn evolve_below_threshold_is_invalid_state() {
    let err = evolve_outcome(900, 1, 1000).unwrap_err();
    match err {
        ApiError::InvalidState(msg) => assert!(msg.contains("100m"), "unexpected message: {msg}"),
        other => panic!("expected InvalidState, got {other:?}"),
    }
}

#[test]
fn requirement_grows_by_half_and_floors() {
    let outcome = evolve_outcome(1500, 2, 1500).unwrap();
    assert_eq!(outcome.new_distance_required, 2250);

    // 2250 * 1.5 = 3375; 3375 * 1.5 = 5062.5 floors to 5062.
    let outcome = evolve_outcome(3375, 3, 3375).unwrap();
    assert_eq!(outcome.new_distance_required, 5062);
}

#[test]
fn consecutive_evolutions_drain_banked_distance() {
    // Owner has 2600m banked; stage 1 needs 1000, stage 2 needs 1500.
    let mut distance = 2600i64;
    let first = evolve_outcome(distance, 1, 1000).unwrap();
    distance -= first.distance_consumed;
    assert_eq!(distance, 1600);

    let second = evolve_outcome(distance, first.new_stage, first.new_distance_required).unwrap();
    distance -= second.distance_consumed;
    assert_eq!(second.new_stage, 3);
    assert_eq!(distance, 100);

    // Not enough left for stage 3's 2250m requirement.
    assert!(matches!(
        evolve_outcome(distance, second.new_stage, second.new_distance_required),
        Err(ApiError::InvalidState(_))
    ));
}
