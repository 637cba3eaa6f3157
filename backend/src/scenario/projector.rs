//! Projection engine
//!
//! Deterministic weekly compounding for the three named annual-rate
//! assumptions:
//!
//! ```text
//! 1. Normalize the horizon and contribution to a weekly cadence
//! 2. Convert each annual rate to a weekly rate: (1 + r)^(1/52) - 1
//! 3. Grow week by week; the contribution lands after growth, every week
//! 4. Derive the contributions baseline, drawdowns, realized returns
//! 5. Look up the performance fee per path (reported, never deducted)
//! ```
//!
//! Growth applies from week 1 onward; it is never deferred past the lock
//! period. The lock period only selects the fee bucket.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fees::{FeeSchedule, FeeScheduleError, LockBucket};
use crate::scenario::drawdown::drawdown_series;

/// Weeks used to derive the compounding-equivalent weekly rate.
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Cadence of the periodic contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionFrequency {
    Weekly,
    Monthly,
    Quarterly,
}

impl ContributionFrequency {
    /// Weeks per configured period (the normalization factor).
    pub fn weeks_per_period(self) -> usize {
        match self {
            ContributionFrequency::Weekly => 1,
            ContributionFrequency::Monthly => 4,
            ContributionFrequency::Quarterly => 12,
        }
    }
}

/// The three named growth assumptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioKind {
    Pessimistic,
    Moderate,
    Optimistic,
}

impl ScenarioKind {
    /// All kinds, in reporting order.
    pub const ALL: [ScenarioKind; 3] = [
        ScenarioKind::Pessimistic,
        ScenarioKind::Moderate,
        ScenarioKind::Optimistic,
    ];

    /// Lower-case label used as a dictionary key at the FFI boundary.
    pub fn label(self) -> &'static str {
        match self {
            ScenarioKind::Pessimistic => "pessimistic",
            ScenarioKind::Moderate => "moderate",
            ScenarioKind::Optimistic => "optimistic",
        }
    }
}

/// Annualized return assumption per scenario kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRates {
    pub pessimistic: f64,
    pub moderate: f64,
    pub optimistic: f64,
}

impl ScenarioRates {
    /// The rate backing a given kind.
    pub fn rate_for(&self, kind: ScenarioKind) -> f64 {
        match kind {
            ScenarioKind::Pessimistic => self.pessimistic,
            ScenarioKind::Moderate => self.moderate,
            ScenarioKind::Optimistic => self.optimistic,
        }
    }
}

impl Default for ScenarioRates {
    fn default() -> Self {
        Self {
            pessimistic: 0.1857,
            moderate: 0.2950,
            optimistic: 0.6500,
        }
    }
}

/// Complete projection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Starting capital (>= 0)
    pub initial_capital: f64,

    /// Contribution per configured period (>= 0)
    pub periodic_contribution: f64,

    /// Cadence the contribution is quoted in
    pub contribution_frequency: ContributionFrequency,

    /// Horizon in units of `contribution_frequency` (>= 1)
    pub horizon_periods: usize,

    /// Lock period in months; selects the fee bucket (6 or 12)
    pub lock_period_months: u32,

    /// When false the weekly contribution is forced to zero and the
    /// projection is pure compounding
    pub include_contributions: bool,

    /// Annualized return assumptions
    pub annual_rates: ScenarioRates,

    /// Performance-fee schedule applied to each path's realized return
    pub fee_schedule: FeeSchedule,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            initial_capital: 5_000.0,
            periodic_contribution: 100.0,
            contribution_frequency: ContributionFrequency::Weekly,
            horizon_periods: 52,
            lock_period_months: 6,
            include_contributions: true,
            annual_rates: ScenarioRates::default(),
            fee_schedule: FeeSchedule::default(),
        }
    }
}

/// Rejection cases for an invalid projection configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("horizon_periods must be at least 1")]
    ZeroHorizon,

    #[error("initial_capital must be non-negative, got {0}")]
    NegativeCapital(f64),

    #[error("periodic_contribution must be non-negative, got {0}")]
    NegativeContribution(f64),

    #[error("{kind} annual rate must be greater than -1, got {rate}")]
    RateBelowFloor { kind: &'static str, rate: f64 },

    #[error("lock period of {0} months has no fee bucket (expected 6 or 12)")]
    UnsupportedLockPeriod(u32),

    #[error(transparent)]
    FeeSchedule(#[from] FeeScheduleError),
}

/// One projected growth path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPath {
    /// Which assumption produced this path
    pub kind: ScenarioKind,

    /// Cumulative value per week, gross of performance fees
    pub values: Vec<f64>,

    /// Percentage decline from the running peak, per week
    pub drawdown_pct: Vec<f64>,

    /// Gain over cumulative contributions at the horizon's end, in percent
    pub realized_return_pct: f64,

    /// Performance-fee rate owed on the gain (reported, not deducted)
    pub fee_rate: f64,
}

/// Full projection result: the three paths plus the contributions baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    /// Length of every series, in weeks
    pub weeks: usize,

    /// `initial_capital + weekly_contribution * w` reference series
    pub cumulative_contributions: Vec<f64>,

    /// Paths in `ScenarioKind::ALL` order
    pub paths: Vec<ScenarioPath>,
}

impl ScenarioProjection {
    /// The path for a given kind.
    pub fn path(&self, kind: ScenarioKind) -> &ScenarioPath {
        self.paths
            .iter()
            .find(|path| path.kind == kind)
            .expect("projection holds one path per scenario kind")
    }
}

/// Convert an annual rate to the weekly rate that compounds back to it over
/// 52 weeks: `(1 + annual)^(1/52) - 1`.
pub fn weekly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / WEEKS_PER_YEAR) - 1.0
}

fn validate_config(config: &ScenarioConfig) -> Result<LockBucket, ProjectionError> {
    if config.horizon_periods == 0 {
        return Err(ProjectionError::ZeroHorizon);
    }
    if config.initial_capital < 0.0 {
        return Err(ProjectionError::NegativeCapital(config.initial_capital));
    }
    if config.periodic_contribution < 0.0 {
        return Err(ProjectionError::NegativeContribution(
            config.periodic_contribution,
        ));
    }
    for kind in ScenarioKind::ALL {
        let rate = config.annual_rates.rate_for(kind);
        if rate <= -1.0 {
            return Err(ProjectionError::RateBelowFloor {
                kind: kind.label(),
                rate,
            });
        }
    }
    let bucket = LockBucket::from_months(config.lock_period_months)
        .ok_or(ProjectionError::UnsupportedLockPeriod(config.lock_period_months))?;
    config.fee_schedule.validate()?;
    Ok(bucket)
}

/// Project all three scenarios.
///
/// Validates the configuration, then runs the full horizon synchronously
/// and returns the complete series; a failed run returns no series at all.
pub fn project_scenarios(config: &ScenarioConfig) -> Result<ScenarioProjection, ProjectionError> {
    let bucket = validate_config(config)?;

    let per_period = config.contribution_frequency.weeks_per_period();
    let weeks = config.horizon_periods * per_period;
    let weekly_contribution = if config.include_contributions {
        config.periodic_contribution / per_period as f64
    } else {
        0.0
    };

    let cumulative_contributions: Vec<f64> = (0..weeks)
        .map(|week| config.initial_capital + weekly_contribution * week as f64)
        .collect();
    let final_contribution = config.initial_capital + weekly_contribution * (weeks - 1) as f64;

    let paths = ScenarioKind::ALL
        .iter()
        .map(|&kind| {
            let step = 1.0 + weekly_rate(config.annual_rates.rate_for(kind));

            let mut values = Vec::with_capacity(weeks);
            let mut current = config.initial_capital;
            values.push(current);
            for _ in 1..weeks {
                current = current * step + weekly_contribution;
                values.push(current);
            }

            let final_value = current;
            let realized_return_pct = if final_contribution > 0.0 {
                (final_value - final_contribution) / final_contribution * 100.0
            } else {
                // Degenerate baseline (no capital, no contributions).
                0.0
            };

            ScenarioPath {
                kind,
                drawdown_pct: drawdown_series(&values),
                realized_return_pct,
                fee_rate: config.fee_schedule.rate_for(realized_return_pct, bucket),
                values,
            }
        })
        .collect();

    Ok(ScenarioProjection {
        weeks,
        cumulative_contributions,
        paths,
    })
}
