//! Daily snapshot
//!
//! One record per simulated day: the day index, signed aggregate capital,
//! active head-count, and an ownership percentage for every investor ever
//! created by that day.

use serde::{Deserialize, Serialize};

use crate::models::portfolio::Portfolio;

/// State of the portfolio at the end of one simulated day.
///
/// `total_investment` is a signed running figure: exits and daily fee drag
/// can push it fractional or negative and it is never clamped.
/// `ownership_pct[i]` belongs to investor id `i`; it is `0.0` for inactive
/// investors, and `0.0` for everyone on days where `total_investment <= 0`
/// (the documented degenerate-division policy; never a fault).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    /// Day index, 0-based
    pub day: usize,

    /// Aggregate capital at the end of the day (signed, unclamped)
    pub total_investment: f64,

    /// Number of investors still in the portfolio
    pub active_investor_count: usize,

    /// Ownership percentage per investor id (0 for inactive)
    pub ownership_pct: Vec<f64>,
}

impl DailySnapshot {
    /// Capture the portfolio's state for `day`.
    pub fn capture(day: usize, total_investment: f64, portfolio: &Portfolio) -> Self {
        let ownership_pct = portfolio
            .iter()
            .map(|inv| {
                if inv.is_active() && total_investment > 0.0 {
                    inv.investment() / total_investment * 100.0
                } else {
                    0.0
                }
            })
            .collect();

        Self {
            day,
            total_investment,
            active_investor_count: portfolio.active_count(),
            ownership_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_sums_to_100_when_total_positive() {
        let mut portfolio = Portfolio::new();
        portfolio.add(2_500.0, 0, 30);
        portfolio.add(7_500.0, 0, 30);

        let snap = DailySnapshot::capture(0, 10_000.0, &portfolio);
        let sum: f64 = snap.ownership_pct.iter().sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(snap.active_investor_count, 2);
    }

    #[test]
    fn inactive_investor_reports_zero() {
        let mut portfolio = Portfolio::new();
        let a = portfolio.add(2_500.0, 0, 30);
        portfolio.add(7_500.0, 0, 30);
        portfolio.get_mut(a).unwrap().deactivate();

        let snap = DailySnapshot::capture(3, 7_500.0, &portfolio);
        assert_eq!(snap.ownership_pct[a], 0.0);
        assert!((snap.ownership_pct[1] - 100.0).abs() < 1e-9);
        assert_eq!(snap.active_investor_count, 1);
    }

    #[test]
    fn non_positive_total_reports_all_zero() {
        let mut portfolio = Portfolio::new();
        portfolio.add(2_500.0, 0, 30);
        portfolio.add(7_500.0, 0, 30);

        for total in [0.0, -123.45] {
            let snap = DailySnapshot::capture(0, total, &portfolio);
            assert!(snap.ownership_pct.iter().all(|&pct| pct == 0.0));
        }
    }
}
