//! Integration tests for the performance-fee schedule
//!
//! The schedule is configuration, not logic: these tests pin the two
//! preserved presets and the lookup/validation contract an externally
//! supplied schedule must satisfy.

use portfolio_simulator_core_rs::{FeeSchedule, FeeScheduleError, FeeTier, LockBucket};

#[test]
fn test_standard_preset_matches_observed_brackets() {
    let schedule = FeeSchedule::standard();

    let cases = [
        (5.0, 0.10),
        (12.0, 0.10),
        (13.0, 0.18),
        (25.0, 0.18),
        (30.0, 0.25),
        (40.0, 0.25),
        (41.0, 0.32),
        (120.0, 0.32),
    ];
    for (ret, expected) in cases {
        for bucket in [LockBucket::SixMonths, LockBucket::TwelveMonths] {
            assert_eq!(
                schedule.rate_for(ret, bucket),
                expected,
                "return {}% in {} bucket",
                ret,
                bucket
            );
        }
    }
}

#[test]
fn test_wide_bracket_preset_matches_observed_brackets() {
    let schedule = FeeSchedule::wide_bracket();

    let cases = [(10.0, 0.18), (20.0, 0.24), (50.0, 0.33), (80.0, 0.39)];
    for (ret, expected) in cases {
        assert_eq!(schedule.rate_for(ret, LockBucket::SixMonths), expected);
    }
}

#[test]
fn test_negative_returns_land_in_the_first_tier() {
    let schedule = FeeSchedule::standard();
    assert_eq!(schedule.rate_for(-35.0, LockBucket::SixMonths), 0.10);
}

#[test]
fn test_lookup_is_monotone_within_a_bucket() {
    for schedule in [FeeSchedule::standard(), FeeSchedule::wide_bracket()] {
        for bucket in [LockBucket::SixMonths, LockBucket::TwelveMonths] {
            let mut previous = f64::MIN;
            for step in -50..=200 {
                let rate = schedule.rate_for(step as f64, bucket);
                assert!(
                    rate >= previous,
                    "rate decreased at return {}% in {} bucket",
                    step,
                    bucket
                );
                previous = rate;
            }
        }
    }
}

#[test]
fn test_returns_beyond_every_breakpoint_hit_the_top_tier() {
    let schedule = FeeSchedule::standard();
    assert_eq!(schedule.rate_for(1_000_000.0, LockBucket::SixMonths), 0.32);
    assert_eq!(schedule.rate_for(f64::INFINITY, LockBucket::TwelveMonths), 0.32);
}

#[test]
fn test_externally_supplied_schedule_is_swappable() {
    // A caller-provided bracket set with per-bucket variation; the lookup
    // algorithm is untouched.
    let schedule = FeeSchedule::new(
        vec![
            FeeTier::up_to(10.0, 0.05),
            FeeTier::up_to(30.0, 0.12),
            FeeTier::unbounded(0.22),
        ],
        vec![FeeTier::up_to(30.0, 0.08), FeeTier::unbounded(0.16)],
    )
    .unwrap();

    assert_eq!(schedule.rate_for(8.0, LockBucket::SixMonths), 0.05);
    assert_eq!(schedule.rate_for(8.0, LockBucket::TwelveMonths), 0.08);
    assert_eq!(schedule.rate_for(99.0, LockBucket::SixMonths), 0.22);
    assert_eq!(schedule.rate_for(99.0, LockBucket::TwelveMonths), 0.16);
}

#[test]
fn test_json_round_trip_preserves_the_schedule() {
    let schedule = FeeSchedule::wide_bracket();
    let json = serde_json::to_string(&schedule).unwrap();
    let restored: FeeSchedule = serde_json::from_str(&json).unwrap();
    assert_eq!(schedule, restored);
    assert!(restored.validate().is_ok());
}

#[test]
fn test_validation_rejects_malformed_schedules() {
    // No tiers at all.
    assert!(matches!(
        FeeSchedule::new(vec![], vec![FeeTier::unbounded(0.1)]),
        Err(FeeScheduleError::EmptyBucket { .. })
    ));

    // Top tier must be unbounded.
    assert!(matches!(
        FeeSchedule::new(
            vec![FeeTier::up_to(40.0, 0.2)],
            vec![FeeTier::unbounded(0.1)],
        ),
        Err(FeeScheduleError::MissingTopTier { .. })
    ));

    // Bounds must strictly ascend.
    assert!(matches!(
        FeeSchedule::new(
            vec![
                FeeTier::up_to(20.0, 0.1),
                FeeTier::up_to(20.0, 0.2),
                FeeTier::unbounded(0.3),
            ],
            vec![FeeTier::unbounded(0.1)],
        ),
        Err(FeeScheduleError::UnorderedBounds { .. })
    ));

    // Rates are fractions.
    assert!(matches!(
        FeeSchedule::new(
            vec![FeeTier::unbounded(-0.1)],
            vec![FeeTier::unbounded(0.1)],
        ),
        Err(FeeScheduleError::RateOutOfRange { .. })
    ));
}

#[test]
fn test_lock_bucket_mapping() {
    assert_eq!(LockBucket::from_months(6), Some(LockBucket::SixMonths));
    assert_eq!(LockBucket::from_months(12), Some(LockBucket::TwelveMonths));
    assert_eq!(LockBucket::from_months(9), None);
    assert_eq!(LockBucket::SixMonths.months(), 6);
}
