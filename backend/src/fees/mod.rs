//! Performance-fee schedule
//!
//! A data-driven tier table: for each lock-period bucket, an ordered list of
//! `(upper return bound, fee rate)` breakpoints with an unbounded final
//! tier. Lookup is "first tier whose upper bound covers the realized
//! return". Breakpoints and rates are configuration, not logic: schedules
//! are serde-deserializable so a caller can supply an arbitrary bracket set
//! without touching the lookup.
//!
//! Two bracket sets have been in production use; both are preserved as
//! named presets (`standard`, `wide_bracket`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lock-period bucket used to partition the tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockBucket {
    /// 6-month lock
    SixMonths,
    /// 12-month lock
    TwelveMonths,
}

impl LockBucket {
    /// Map a lock period in months to its bucket.
    pub fn from_months(months: u32) -> Option<Self> {
        match months {
            6 => Some(LockBucket::SixMonths),
            12 => Some(LockBucket::TwelveMonths),
            _ => None,
        }
    }

    /// Bucket duration in months.
    pub fn months(self) -> u32 {
        match self {
            LockBucket::SixMonths => 6,
            LockBucket::TwelveMonths => 12,
        }
    }
}

impl std::fmt::Display for LockBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m", self.months())
    }
}

/// One breakpoint of the schedule.
///
/// `max_return_pct: None` marks the unbounded top tier; every bucket's tier
/// list must end with exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeTier {
    /// Upper bound (inclusive) on the realized return percentage this tier
    /// covers; `None` = unbounded
    pub max_return_pct: Option<f64>,

    /// Fee rate charged on the gain, as a fraction in [0, 1]
    pub rate: f64,
}

impl FeeTier {
    /// Bounded tier covering returns up to `max_return_pct` inclusive.
    pub fn up_to(max_return_pct: f64, rate: f64) -> Self {
        Self {
            max_return_pct: Some(max_return_pct),
            rate,
        }
    }

    /// The unbounded top tier.
    pub fn unbounded(rate: f64) -> Self {
        Self {
            max_return_pct: None,
            rate,
        }
    }
}

/// Validation failures for a supplied schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeeScheduleError {
    #[error("fee schedule has no tiers for the {bucket} bucket")]
    EmptyBucket { bucket: LockBucket },

    #[error("fee schedule for the {bucket} bucket must end with one unbounded tier")]
    MissingTopTier { bucket: LockBucket },

    #[error("fee schedule bounds for the {bucket} bucket must be strictly ascending")]
    UnorderedBounds { bucket: LockBucket },

    #[error("fee rate {rate} is outside [0, 1]")]
    RateOutOfRange { rate: f64 },
}

/// Tiered performance-fee schedule, partitioned by lock bucket.
///
/// # Example
/// ```
/// use portfolio_simulator_core_rs::{FeeSchedule, LockBucket};
///
/// let schedule = FeeSchedule::standard();
/// assert_eq!(schedule.rate_for(8.0, LockBucket::SixMonths), 0.10);
/// assert_eq!(schedule.rate_for(55.0, LockBucket::SixMonths), 0.32);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    six_month_tiers: Vec<FeeTier>,
    twelve_month_tiers: Vec<FeeTier>,
}

impl FeeSchedule {
    /// Build a schedule from per-bucket tier lists, validating that each
    /// bucket is non-empty, strictly ascending, capped by exactly one
    /// unbounded tier, and that every rate is a fraction in [0, 1].
    pub fn new(
        six_month_tiers: Vec<FeeTier>,
        twelve_month_tiers: Vec<FeeTier>,
    ) -> Result<Self, FeeScheduleError> {
        Self::validate_tiers(&six_month_tiers, LockBucket::SixMonths)?;
        Self::validate_tiers(&twelve_month_tiers, LockBucket::TwelveMonths)?;
        Ok(Self {
            six_month_tiers,
            twelve_month_tiers,
        })
    }

    /// Re-check the schedule invariants.
    ///
    /// Deserialized schedules bypass `new`, so consumers validate before
    /// the first lookup.
    pub fn validate(&self) -> Result<(), FeeScheduleError> {
        Self::validate_tiers(&self.six_month_tiers, LockBucket::SixMonths)?;
        Self::validate_tiers(&self.twelve_month_tiers, LockBucket::TwelveMonths)?;
        Ok(())
    }

    fn validate_tiers(tiers: &[FeeTier], bucket: LockBucket) -> Result<(), FeeScheduleError> {
        if tiers.is_empty() {
            return Err(FeeScheduleError::EmptyBucket { bucket });
        }

        for tier in tiers {
            if !(0.0..=1.0).contains(&tier.rate) {
                return Err(FeeScheduleError::RateOutOfRange { rate: tier.rate });
            }
        }

        // Every tier but the last must be bounded, and bounds must ascend.
        let (top, bounded) = tiers.split_last().expect("tiers checked non-empty");
        if top.max_return_pct.is_some() {
            return Err(FeeScheduleError::MissingTopTier { bucket });
        }

        let mut previous: Option<f64> = None;
        for tier in bounded {
            let bound = tier
                .max_return_pct
                .ok_or(FeeScheduleError::UnorderedBounds { bucket })?;
            if let Some(prev) = previous {
                if bound <= prev {
                    return Err(FeeScheduleError::UnorderedBounds { bucket });
                }
            }
            previous = Some(bound);
        }

        Ok(())
    }

    /// The tier list for a bucket, in ascending bound order.
    pub fn tiers(&self, bucket: LockBucket) -> &[FeeTier] {
        match bucket {
            LockBucket::SixMonths => &self.six_month_tiers,
            LockBucket::TwelveMonths => &self.twelve_month_tiers,
        }
    }

    /// Look up the fee rate for a realized return percentage.
    ///
    /// Returns the rate of the first tier whose upper bound is >= the
    /// return; returns above every finite breakpoint land in the unbounded
    /// top tier, so the lookup never fails.
    pub fn rate_for(&self, realized_return_pct: f64, bucket: LockBucket) -> f64 {
        let tiers = self.tiers(bucket);
        for tier in tiers {
            match tier.max_return_pct {
                Some(bound) if realized_return_pct <= bound => return tier.rate,
                Some(_) => {}
                None => return tier.rate,
            }
        }
        // Unreachable for a validated schedule; the top tier is unbounded.
        tiers.last().map(|tier| tier.rate).unwrap_or(0.0)
    }

    /// The 10/18/25/32% bracket set at <=12 / <=25 / <=40 / unbounded,
    /// applied to both lock buckets.
    pub fn standard() -> Self {
        let tiers = vec![
            FeeTier::up_to(12.0, 0.10),
            FeeTier::up_to(25.0, 0.18),
            FeeTier::up_to(40.0, 0.25),
            FeeTier::unbounded(0.32),
        ];
        Self {
            six_month_tiers: tiers.clone(),
            twelve_month_tiers: tiers,
        }
    }

    /// The 18/24/33/39% bracket set at <=15 / <=35 / <=60 / unbounded,
    /// applied to both lock buckets.
    pub fn wide_bracket() -> Self {
        let tiers = vec![
            FeeTier::up_to(15.0, 0.18),
            FeeTier::up_to(35.0, 0.24),
            FeeTier::up_to(60.0, 0.33),
            FeeTier::unbounded(0.39),
        ];
        Self {
            six_month_tiers: tiers.clone(),
            twelve_month_tiers: tiers,
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_preset_brackets() {
        let schedule = FeeSchedule::standard();
        for bucket in [LockBucket::SixMonths, LockBucket::TwelveMonths] {
            assert_eq!(schedule.rate_for(-5.0, bucket), 0.10);
            assert_eq!(schedule.rate_for(12.0, bucket), 0.10);
            assert_eq!(schedule.rate_for(12.1, bucket), 0.18);
            assert_eq!(schedule.rate_for(25.0, bucket), 0.18);
            assert_eq!(schedule.rate_for(40.0, bucket), 0.25);
            assert_eq!(schedule.rate_for(40.1, bucket), 0.32);
            assert_eq!(schedule.rate_for(500.0, bucket), 0.32);
        }
    }

    #[test]
    fn wide_bracket_preset_brackets() {
        let schedule = FeeSchedule::wide_bracket();
        assert_eq!(schedule.rate_for(15.0, LockBucket::SixMonths), 0.18);
        assert_eq!(schedule.rate_for(35.0, LockBucket::SixMonths), 0.24);
        assert_eq!(schedule.rate_for(60.0, LockBucket::TwelveMonths), 0.33);
        assert_eq!(schedule.rate_for(61.0, LockBucket::TwelveMonths), 0.39);
    }

    #[test]
    fn per_bucket_variation_is_expressible() {
        let schedule = FeeSchedule::new(
            vec![FeeTier::up_to(20.0, 0.15), FeeTier::unbounded(0.30)],
            vec![FeeTier::up_to(20.0, 0.10), FeeTier::unbounded(0.25)],
        )
        .unwrap();
        assert_eq!(schedule.rate_for(10.0, LockBucket::SixMonths), 0.15);
        assert_eq!(schedule.rate_for(10.0, LockBucket::TwelveMonths), 0.10);
    }

    #[test]
    fn rejects_empty_bucket() {
        let err = FeeSchedule::new(vec![], vec![FeeTier::unbounded(0.2)]).unwrap_err();
        assert_eq!(
            err,
            FeeScheduleError::EmptyBucket {
                bucket: LockBucket::SixMonths
            }
        );
    }

    #[test]
    fn rejects_bounded_top_tier() {
        let err = FeeSchedule::new(
            vec![FeeTier::up_to(10.0, 0.1)],
            vec![FeeTier::unbounded(0.2)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            FeeScheduleError::MissingTopTier {
                bucket: LockBucket::SixMonths
            }
        );
    }

    #[test]
    fn rejects_unordered_bounds() {
        let err = FeeSchedule::new(
            vec![
                FeeTier::up_to(25.0, 0.1),
                FeeTier::up_to(12.0, 0.2),
                FeeTier::unbounded(0.3),
            ],
            vec![FeeTier::unbounded(0.2)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            FeeScheduleError::UnorderedBounds {
                bucket: LockBucket::SixMonths
            }
        );
    }

    #[test]
    fn rejects_rate_outside_unit_interval() {
        let err = FeeSchedule::new(
            vec![FeeTier::unbounded(1.5)],
            vec![FeeTier::unbounded(0.2)],
        )
        .unwrap_err();
        assert_eq!(err, FeeScheduleError::RateOutOfRange { rate: 1.5 });
    }

    #[test]
    fn externally_supplied_schedule_via_json() {
        let json = r#"{
            "six_month_tiers": [
                { "max_return_pct": 10.0, "rate": 0.08 },
                { "max_return_pct": null, "rate": 0.20 }
            ],
            "twelve_month_tiers": [
                { "max_return_pct": 10.0, "rate": 0.05 },
                { "max_return_pct": null, "rate": 0.15 }
            ]
        }"#;
        let schedule: FeeSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.rate_for(9.0, LockBucket::SixMonths), 0.08);
        assert_eq!(schedule.rate_for(11.0, LockBucket::TwelveMonths), 0.15);
    }

    #[test]
    fn lookup_is_monotone_in_return() {
        let schedule = FeeSchedule::standard();
        let mut previous = 0.0;
        for step in -10..100 {
            let rate = schedule.rate_for(step as f64, LockBucket::SixMonths);
            assert!(rate >= previous, "rate decreased at return {}", step);
            previous = rate;
        }
    }
}
