use ecoverse_api::constants::BASE_LEVEL_XP;
use ecoverse_api::game::leveling::level_of;

#[test]
fn zero_xp_is_level_one_with_no_progress() {
    let data = level_of(0);
    assert_eq!(data.level, 1);
    assert_eq!(data.xp_into_level, 0);
    assert_eq!(data.xp_needed_this_level, BASE_LEVEL_XP);
    assert_eq!(data.progress_fraction(), 0.0);
}

#[test]
fn just_below_threshold_stays_level_one() {
    let data = level_of(BASE_LEVEL_XP - 1);
    assert_eq!(data.level, 1);
    assert_eq!(data.xp_into_level, BASE_LEVEL_XP - 1);
}

#[test]
fn crossing_base_threshold_reaches_level_two() {
    let data = level_of(BASE_LEVEL_XP);
    assert_eq!(data.level, 2);
    assert_eq!(data.xp_into_level, 0);
    // Level 2 costs 1000 * 1.75, floored.
    assert_eq!(data.xp_needed_this_level, 1750);
}

#[test]
fn second_threshold_boundary() {
    // Cumulative cost of levels 1 and 2 is 1000 + 1750 = 2750.
    let below = level_of(2749);
    assert_eq!(below.level, 2);
    assert_eq!(below.xp_into_level, 1749);

    let at = level_of(2750);
    assert_eq!(at.level, 3);
    assert_eq!(at.xp_into_level, 0);
    // Level 3 costs floor(1750 * 1.75) = floor(3062.5).
    assert_eq!(at.xp_needed_this_level, 3062);
}

#[test]
fn progress_is_always_a_proper_fraction() {
    // Sweep an irregular grid of XP values; the invariants must hold on all of them.
    for xp in (0..2_000_000i64).step_by(997) {
        let data = level_of(xp);
        assert!(data.level >= 1, "level must be positive for xp={xp}");
        assert!(data.xp_into_level >= 0, "negative progress for xp={xp}");
        assert!(
            data.xp_into_level < data.xp_needed_this_level,
            "progress overflow at xp={xp}: {} >= {}",
            data.xp_into_level,
            data.xp_needed_this_level
        );
        let fraction = data.progress_fraction();
        assert!((0.0..1.0).contains(&fraction), "fraction {fraction} out of range");
    }
}

#[test]
fn level_is_monotonic_in_xp() {
    let mut last_level = 0;
    for xp in (0..500_000i64).step_by(1234) {
        let level = level_of(xp).level;
        assert!(level >= last_level, "level regressed at xp={xp}");
        last_level = level;
    }
}
