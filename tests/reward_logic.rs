use ecoverse_api::error::ApiError;
use ecoverse_api::game::rewards::{conversion_quote, deposit_reward, walk_reward};

#[test]
fn deposit_pays_base_plus_rate() {
    let reward = deposit_reward(1).unwrap();
    assert_eq!(reward.xp, 15); // 10 base + 5 per point
    assert_eq!(reward.gp, 30); // 20 base + 10 per point

    let reward = deposit_reward(120).unwrap();
    assert_eq!(reward.xp, 10 + 120 * 5);
    assert_eq!(reward.gp, 20 + 120 * 10);
}

#[test]
fn deposit_is_monotonic_in_points() {
    let mut last = deposit_reward(1).unwrap();
    for points in 2..200 {
        let reward = deposit_reward(points).unwrap();
        assert!(reward.xp > last.xp);
        assert!(reward.gp > last.gp);
        last = reward;
    }
}

#[test]
fn deposit_rejects_non_positive_points() {
    assert!(matches!(deposit_reward(0), Err(ApiError::InvalidInput(_))));
    assert!(matches!(deposit_reward(-5), Err(ApiError::InvalidInput(_))));
}

#[test]
fn walk_crossing_one_boundary_pays_one_milestone() {
    let outcome = walk_reward(900, 150).unwrap();
    assert_eq!(outcome.new_total_distance, 1050);
    assert_eq!(outcome.milestones_crossed, 1);
    assert_eq!(outcome.reward.xp, 20);
    assert_eq!(outcome.reward.gp, 40);
}

#[test]
fn walk_crossing_no_boundary_pays_nothing() {
    let outcome = walk_reward(100, 50).unwrap();
    assert_eq!(outcome.new_total_distance, 150);
    assert_eq!(outcome.milestones_crossed, 0);
    assert_eq!(outcome.reward.xp, 0);
    assert_eq!(outcome.reward.gp, 0);
}

#[test]
fn walk_landing_exactly_on_boundary_counts() {
    let outcome = walk_reward(0, 1000).unwrap();
    assert_eq!(outcome.milestones_crossed, 1);
}

#[test]
fn walk_can_cross_several_boundaries_at_once() {
    let outcome = walk_reward(500, 3000).unwrap();
    // 3500 / 1000 = 3 boundaries, 500 / 1000 = 0 already claimed.
    assert_eq!(outcome.milestones_crossed, 3);
    assert_eq!(outcome.reward.xp, 60);
    assert_eq!(outcome.reward.gp, 120);
}

#[test]
fn walk_zero_delta_is_accepted_and_pays_nothing() {
    let outcome = walk_reward(999, 0).unwrap();
    assert_eq!(outcome.milestones_crossed, 0);
    assert_eq!(outcome.new_total_distance, 999);
}

#[test]
fn walk_rejects_negative_delta() {
    assert!(matches!(
        walk_reward(1000, -1),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn deposit_rejects_points_that_would_overflow() {
    assert!(matches!(
        deposit_reward(i64::MAX),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        deposit_reward(i64::MAX / 5),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn walk_rejects_delta_that_would_overflow_total() {
    assert!(matches!(
        walk_reward(1000, i64::MAX),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        walk_reward(i64::MAX, 1),
        Err(ApiError::InvalidInput(_))
    ));
    // Right at the limit still works.
    let outcome = walk_reward(0, i64::MAX).unwrap();
    assert_eq!(outcome.new_total_distance, i64::MAX);
}

#[test]
fn conversion_pays_the_fixed_rate() {
    assert_eq!(conversion_quote(1).unwrap(), 100);
    assert_eq!(conversion_quote(7).unwrap(), 700);
}

#[test]
fn conversion_rejects_non_positive_and_overflowing_amounts() {
    assert!(matches!(conversion_quote(0), Err(ApiError::InvalidInput(_))));
    assert!(matches!(
        conversion_quote(-3),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        conversion_quote(i64::MAX),
        Err(ApiError::InvalidInput(_))
    ));
}
