//! Portfolio ledger
//!
//! Append-only, insertion-ordered collection of every investor ever
//! created. Ids are arena indices: entries are never removed and ids are
//! never reused, so an exited investor stays in the ledger for historical
//! ownership reporting.
//!
//! # Critical Invariants
//!
//! 1. `investors[i].id() == i` for every entry
//! 2. Entries are only ever appended, never removed or reordered
//! 3. Deactivation is the only mutation after creation

use serde::{Deserialize, Serialize};

use crate::models::investor::Investor;

/// Append-only investor ledger.
///
/// # Example
/// ```
/// use portfolio_simulator_core_rs::Portfolio;
///
/// let mut portfolio = Portfolio::new();
/// let id = portfolio.add(10_000.0, 0, 180);
/// assert_eq!(id, 0);
/// assert_eq!(portfolio.active_count(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    investors: Vec<Investor>,
}

impl Portfolio {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new active investor and return its id.
    pub fn add(&mut self, investment: f64, entry_day: usize, lock_period_days: usize) -> usize {
        let id = self.investors.len();
        self.investors
            .push(Investor::new(id, investment, entry_day, lock_period_days));
        id
    }

    /// Look up an investor by id.
    pub fn get(&self, id: usize) -> Option<&Investor> {
        self.investors.get(id)
    }

    /// Mutable lookup, used by the simulator to deactivate on exit.
    pub fn get_mut(&mut self, id: usize) -> Option<&mut Investor> {
        self.investors.get_mut(id)
    }

    /// Iterate over every investor ever created, in entry order.
    pub fn iter(&self) -> impl Iterator<Item = &Investor> {
        self.investors.iter()
    }

    /// Total number of investors ever created.
    pub fn len(&self) -> usize {
        self.investors.len()
    }

    /// True when no investor has ever been created.
    pub fn is_empty(&self) -> bool {
        self.investors.is_empty()
    }

    /// Number of investors currently in the portfolio.
    pub fn active_count(&self) -> usize {
        self.investors.iter().filter(|inv| inv.is_active()).count()
    }

    /// Display labels in ledger order (`investor_1`, `investor_2`, ...).
    ///
    /// The dashboard keys its per-investor columns by these; they line up
    /// index-for-index with `DailySnapshot::ownership_pct`.
    pub fn labels(&self) -> Vec<String> {
        (1..=self.investors.len())
            .map(|n| format!("investor_{}", n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_arena_indices() {
        let mut portfolio = Portfolio::new();
        for expected in 0..10 {
            let id = portfolio.add(1_000.0, 0, 30);
            assert_eq!(id, expected);
        }
        for (i, inv) in portfolio.iter().enumerate() {
            assert_eq!(inv.id(), i);
        }
    }

    #[test]
    fn inactive_investors_remain_in_ledger() {
        let mut portfolio = Portfolio::new();
        let a = portfolio.add(1_000.0, 0, 30);
        let b = portfolio.add(2_000.0, 0, 30);

        portfolio.get_mut(a).unwrap().deactivate();

        assert_eq!(portfolio.len(), 2);
        assert_eq!(portfolio.active_count(), 1);
        assert!(!portfolio.get(a).unwrap().is_active());
        assert!(portfolio.get(b).unwrap().is_active());
    }

    #[test]
    fn labels_are_one_based() {
        let mut portfolio = Portfolio::new();
        portfolio.add(1_000.0, 0, 30);
        portfolio.add(2_000.0, 1, 60);
        assert_eq!(portfolio.labels(), vec!["investor_1", "investor_2"]);
    }
}
