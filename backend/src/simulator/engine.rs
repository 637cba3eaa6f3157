//! Simulator engine
//!
//! The day loop integrating the stochastic portfolio model:
//!
//! ```text
//! For each day d:
//! 1. Exit processing  (early withdrawals, then post-lock exits)
//! 2. Fee drag         (annual management fee, prorated daily)
//! 3. Acquisition      (at most one new investor per day)
//! 4. Snapshot         (capital, head-count, ownership percentages)
//! ```
//!
//! The order is load-bearing: fee drag applies to capital after today's
//! exits, and an investor arriving in step 3 appears in the same day's
//! snapshot.
//!
//! # Determinism
//!
//! All randomness goes through the seeded `RngManager`. Same seed + same
//! config = identical snapshot series.
//!
//! # Example
//!
//! ```
//! use portfolio_simulator_core_rs::{simulate_portfolio, SimulatorConfig};
//!
//! let config = SimulatorConfig {
//!     horizon_days: 30,
//!     rng_seed: 42,
//!     ..SimulatorConfig::default()
//! };
//!
//! let snapshots = simulate_portfolio(&config).unwrap();
//! assert_eq!(snapshots.len(), 30);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DailySnapshot, ExitOutcome, Portfolio};
use crate::rng::RngManager;

/// Days used to prorate annual rates to a daily step.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Complete simulator configuration.
///
/// All fields are validated by `Simulator::new` before any simulation step
/// runs; see `SimulationError` for the rejection cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Number of days to simulate (>= 1)
    pub horizon_days: usize,

    /// Committed-capital range for new investors, `(min, max)` with
    /// `0 < min <= max`
    pub investment_range: (f64, f64),

    /// The two lock-period durations offered, in days (each >= 1);
    /// new investors pick one of the two uniformly
    pub lock_period_options: (usize, usize),

    /// Investors seeded before day 0 runs
    pub initial_investor_count: usize,

    /// Probability that exactly one new investor arrives on a given day
    pub new_investor_daily_probability: f64,

    /// Fraction of the investment forfeited on an early withdrawal
    pub early_withdrawal_penalty_rate: f64,

    /// Daily hazard of an early withdrawal, applied independently of lock
    /// status. Deliberately a separate knob from the penalty rate: the two
    /// concerns are only coupled if the caller couples them.
    pub early_withdrawal_daily_probability: f64,

    /// Probability of exiting on a given day once the lock period elapsed
    pub post_lock_exit_probability: f64,

    /// Annual management fee, deducted pro rata each day with no floor
    pub annual_management_fee_rate: f64,

    /// Seed for the deterministic RNG
    pub rng_seed: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            horizon_days: 365,
            investment_range: (1_000.0, 50_000.0),
            lock_period_options: (180, 365),
            initial_investor_count: 5,
            new_investor_daily_probability: 0.15,
            early_withdrawal_penalty_rate: 0.10,
            early_withdrawal_daily_probability: 0.10 / DAYS_PER_YEAR,
            post_lock_exit_probability: 0.30,
            annual_management_fee_rate: 0.02,
            rng_seed: 12345,
        }
    }
}

/// Rejection cases for an invalid configuration.
///
/// Every variant is produced before the first simulation step; a failed run
/// returns no series at all, never a truncated one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("horizon_days must be at least 1")]
    ZeroHorizon,

    #[error("investment_range ({min}, {max}) is invalid: need 0 < min <= max")]
    InvalidInvestmentRange { min: f64, max: f64 },

    #[error("lock_period_options must both be at least 1 day")]
    ZeroLockPeriod,

    #[error("{field} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },
}

/// Stochastic multi-investor portfolio simulator.
///
/// Owns the full state of one run: the investor ledger, the signed running
/// capital, the current day, and the seeded RNG. Engines are pure beyond
/// their return values; nothing persists between runs.
///
/// # Example
///
/// ```
/// use portfolio_simulator_core_rs::{Simulator, SimulatorConfig};
///
/// let config = SimulatorConfig {
///     horizon_days: 10,
///     ..SimulatorConfig::default()
/// };
/// let mut sim = Simulator::new(config).unwrap();
///
/// let first = sim.step().unwrap();
/// assert_eq!(first.day, 0);
///
/// let rest = sim.run();
/// assert_eq!(rest.len(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulatorConfig,
    portfolio: Portfolio,
    total_investment: f64,
    current_day: usize,
    rng: RngManager,
}

impl Simulator {
    /// Validate the configuration and seed the initial investors.
    ///
    /// The initial investors are created before day 0 begins, each with a
    /// uniformly drawn investment and a uniformly chosen lock period, and
    /// their capital is summed into the starting `total_investment`.
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let mut sim = Self {
            rng: RngManager::new(config.rng_seed),
            portfolio: Portfolio::new(),
            total_investment: 0.0,
            current_day: 0,
            config,
        };

        for _ in 0..sim.config.initial_investor_count {
            sim.spawn_investor(0);
        }

        Ok(sim)
    }

    fn validate_config(config: &SimulatorConfig) -> Result<(), SimulationError> {
        if config.horizon_days == 0 {
            return Err(SimulationError::ZeroHorizon);
        }

        let (min, max) = config.investment_range;
        if !(min > 0.0 && min <= max) {
            return Err(SimulationError::InvalidInvestmentRange { min, max });
        }

        let (short, long) = config.lock_period_options;
        if short == 0 || long == 0 {
            return Err(SimulationError::ZeroLockPeriod);
        }

        let probabilities = [
            (
                "new_investor_daily_probability",
                config.new_investor_daily_probability,
            ),
            (
                "early_withdrawal_penalty_rate",
                config.early_withdrawal_penalty_rate,
            ),
            (
                "early_withdrawal_daily_probability",
                config.early_withdrawal_daily_probability,
            ),
            (
                "post_lock_exit_probability",
                config.post_lock_exit_probability,
            ),
            (
                "annual_management_fee_rate",
                config.annual_management_fee_rate,
            ),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimulationError::ProbabilityOutOfRange { field, value });
            }
        }

        Ok(())
    }

    /// Draw a new investor, append it to the ledger, and add its capital.
    fn spawn_investor(&mut self, entry_day: usize) -> usize {
        let (min, max) = self.config.investment_range;
        let investment = self.rng.uniform(min, max);

        let (short, long) = self.config.lock_period_options;
        let lock_period_days = if self.rng.chance(0.5) { short } else { long };

        let id = self.portfolio.add(investment, entry_day, lock_period_days);
        self.total_investment += investment;
        id
    }

    /// Advance the simulation by exactly one day.
    ///
    /// Returns `None` once the configured horizon has been consumed.
    pub fn step(&mut self) -> Option<DailySnapshot> {
        if self.current_day >= self.config.horizon_days {
            return None;
        }
        let day = self.current_day;

        // STEP 1: EXIT PROCESSING
        // Each active investor is evaluated at most once; an investor who
        // exits here is already inactive for today's snapshot.
        for id in 0..self.portfolio.len() {
            let outcome = match self.portfolio.get(id) {
                Some(inv) => inv.evaluate_exit(
                    day,
                    self.config.early_withdrawal_daily_probability,
                    self.config.post_lock_exit_probability,
                    &mut self.rng,
                ),
                None => ExitOutcome::Stay,
            };

            match outcome {
                ExitOutcome::Stay => {}
                ExitOutcome::EarlyWithdrawal => {
                    if let Some(inv) = self.portfolio.get_mut(id) {
                        inv.deactivate();
                        // The penalty fraction stays behind; the portfolio
                        // loses the payout, not the penalty.
                        self.total_investment -= inv.investment()
                            * (1.0 - self.config.early_withdrawal_penalty_rate);
                    }
                }
                ExitOutcome::LockExpired => {
                    if let Some(inv) = self.portfolio.get_mut(id) {
                        inv.deactivate();
                        self.total_investment -= inv.investment();
                    }
                }
            }
        }

        // STEP 2: FEE DRAG
        // Unconditional, no floor: applies to zero or negative capital too.
        self.total_investment -=
            self.total_investment * self.config.annual_management_fee_rate / DAYS_PER_YEAR;

        // STEP 3: ACQUISITION
        if self.rng.chance(self.config.new_investor_daily_probability) {
            self.spawn_investor(day);
        }

        // STEP 4: SNAPSHOT
        let snapshot = DailySnapshot::capture(day, self.total_investment, &self.portfolio);
        self.current_day += 1;
        Some(snapshot)
    }

    /// Run the remaining days of the horizon and collect their snapshots.
    ///
    /// On a fresh simulator this is the full `horizon_days`-long series;
    /// after manual `step()` calls it returns the rest, so a run never
    /// yields more than `horizon_days` snapshots in total.
    pub fn run(&mut self) -> Vec<DailySnapshot> {
        let mut snapshots =
            Vec::with_capacity(self.config.horizon_days - self.current_day);
        while let Some(snapshot) = self.step() {
            snapshots.push(snapshot);
        }
        snapshots
    }

    /// Day the next `step()` will simulate.
    pub fn current_day(&self) -> usize {
        self.current_day
    }

    /// Signed aggregate capital right now.
    pub fn total_investment(&self) -> f64 {
        self.total_investment
    }

    /// The investor ledger (every investor ever created).
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// The validated configuration this run was built from.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}

/// Run a complete simulation in one call.
///
/// Validates `config`, runs the full horizon, and returns exactly
/// `horizon_days` snapshots.
pub fn simulate_portfolio(
    config: &SimulatorConfig,
) -> Result<Vec<DailySnapshot>, SimulationError> {
    let mut simulator = Simulator::new(config.clone())?;
    Ok(simulator.run())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_horizon() {
        let config = SimulatorConfig {
            horizon_days: 0,
            ..SimulatorConfig::default()
        };
        assert_eq!(Simulator::new(config).unwrap_err(), SimulationError::ZeroHorizon);
    }

    #[test]
    fn rejects_inverted_investment_range() {
        let config = SimulatorConfig {
            investment_range: (50_000.0, 1_000.0),
            ..SimulatorConfig::default()
        };
        assert!(matches!(
            Simulator::new(config).unwrap_err(),
            SimulationError::InvalidInvestmentRange { .. }
        ));
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let config = SimulatorConfig {
            post_lock_exit_probability: 1.5,
            ..SimulatorConfig::default()
        };
        assert_eq!(
            Simulator::new(config).unwrap_err(),
            SimulationError::ProbabilityOutOfRange {
                field: "post_lock_exit_probability",
                value: 1.5,
            }
        );
    }

    #[test]
    fn seeds_initial_investors_before_day_zero() {
        let config = SimulatorConfig {
            investment_range: (10_000.0, 10_000.0),
            ..SimulatorConfig::default()
        };
        let sim = Simulator::new(config).unwrap();
        assert_eq!(sim.portfolio().len(), 5);
        assert_eq!(sim.total_investment(), 50_000.0);
        assert_eq!(sim.current_day(), 0);
    }

    #[test]
    fn step_returns_none_past_horizon() {
        let config = SimulatorConfig {
            horizon_days: 2,
            ..SimulatorConfig::default()
        };
        let mut sim = Simulator::new(config).unwrap();
        assert!(sim.step().is_some());
        assert!(sim.step().is_some());
        assert!(sim.step().is_none());
        assert!(sim.step().is_none());
    }

    #[test]
    fn run_after_step_completes_the_horizon() {
        let config = SimulatorConfig {
            horizon_days: 10,
            ..SimulatorConfig::default()
        };
        let mut sim = Simulator::new(config).unwrap();
        let first = sim.step().unwrap();
        let rest = sim.run();
        assert_eq!(first.day, 0);
        assert_eq!(rest.len(), 9);
        assert_eq!(rest.last().unwrap().day, 9);
    }
}
