//! Investor model
//!
//! Represents one committed investment in the portfolio. Every field except
//! `active` is fixed at creation; portfolio-level capital movements are
//! tracked by the simulator, never written back into the record. `active`
//! flips true → false exactly once, at exit, and never reverts.
//!
//! The invariant that matters for exits: `entry_day + lock_period_days` is
//! the earliest day a penalty-free exit is possible. Before that day only a
//! penalized early withdrawal can remove the investor.

use serde::{Deserialize, Serialize};

use crate::rng::RngManager;

/// Outcome of the daily exit evaluation for one investor.
///
/// The two exit branches are mutually exclusive: the early-withdrawal hazard
/// is drawn first (independent of lock status), and only if it does not fire
/// is the post-lock exit considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitOutcome {
    /// Investor remains in the portfolio.
    Stay,

    /// Exit before the lock period elapsed; the penalty fraction of the
    /// investment is forfeited, the rest is paid out.
    EarlyWithdrawal,

    /// Exit after the lock period elapsed; the full investment is paid out.
    LockExpired,
}

/// One investor's committed capital and lifecycle state.
///
/// # Example
/// ```
/// use portfolio_simulator_core_rs::Investor;
///
/// let inv = Investor::new(0, 25_000.0, 3, 180);
/// assert!(inv.is_active());
/// assert!(!inv.lock_elapsed(100));
/// assert!(inv.lock_elapsed(183));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investor {
    /// Stable ledger index, assigned at creation and never reused
    id: usize,

    /// Committed capital, fixed at creation
    investment: f64,

    /// Simulation day the investor entered
    entry_day: usize,

    /// Lock period in days, one of the two configured options
    lock_period_days: usize,

    /// Whether the investor is still in the portfolio
    active: bool,
}

impl Investor {
    /// Create a new active investor.
    pub fn new(id: usize, investment: f64, entry_day: usize, lock_period_days: usize) -> Self {
        Self {
            id,
            investment,
            entry_day,
            lock_period_days,
            active: true,
        }
    }

    /// Stable ledger index.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Committed capital.
    pub fn investment(&self) -> f64 {
        self.investment
    }

    /// Day the investor entered the portfolio.
    pub fn entry_day(&self) -> usize {
        self.entry_day
    }

    /// Lock period in days.
    pub fn lock_period_days(&self) -> usize {
        self.lock_period_days
    }

    /// Whether the investor is still in the portfolio.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True once `day - entry_day >= lock_period_days`.
    pub fn lock_elapsed(&self, day: usize) -> bool {
        day.saturating_sub(self.entry_day) >= self.lock_period_days
    }

    /// Mark the investor as exited. Idempotent by construction: the
    /// simulator evaluates each investor at most once per day and never
    /// reactivates one.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Evaluate the daily exit decision for this investor.
    ///
    /// Draws the early-withdrawal hazard first; if it does not fire and the
    /// lock period has elapsed, draws the post-lock exit probability. An
    /// inactive investor always stays (no draws are consumed).
    pub fn evaluate_exit(
        &self,
        day: usize,
        early_withdrawal_daily_probability: f64,
        post_lock_exit_probability: f64,
        rng: &mut RngManager,
    ) -> ExitOutcome {
        if !self.active {
            return ExitOutcome::Stay;
        }
        if rng.chance(early_withdrawal_daily_probability) {
            return ExitOutcome::EarlyWithdrawal;
        }
        if self.lock_elapsed(day) && rng.chance(post_lock_exit_probability) {
            return ExitOutcome::LockExpired;
        }
        ExitOutcome::Stay
    }
}
