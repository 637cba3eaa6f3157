//! PyO3 wrappers for the two engines
//!
//! `PortfolioSimulator` drives the stochastic day loop (incrementally or in
//! one shot); `project_scenarios` runs the deterministic projection in a
//! single call.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::simulator::Simulator;

use super::types::{
    parse_scenario_config, parse_simulator_config, projection_to_py, snapshot_to_py,
    snapshots_to_py,
};

/// Python wrapper for the stochastic portfolio simulator.
///
/// # Example (from Python)
///
/// ```python
/// from portfolio_simulator_core_rs import PortfolioSimulator
///
/// sim = PortfolioSimulator.new({
///     "horizon_days": 365,
///     "investment_range": (1_000.0, 50_000.0),
///     "rng_seed": 42,
/// })
/// history = sim.run()
/// print(history[0]["total_investment"], sim.investor_labels())
/// ```
#[pyclass(name = "PortfolioSimulator")]
pub struct PyPortfolioSimulator {
    inner: Simulator,
}

#[pymethods]
impl PyPortfolioSimulator {
    /// Create a simulator from a configuration dict.
    ///
    /// Missing keys fall back to the documented defaults. Raises
    /// `ValueError` when a field is out of range.
    #[staticmethod]
    fn new(config: &Bound<'_, PyDict>) -> PyResult<Self> {
        let rust_config = parse_simulator_config(config)?;

        let inner = Simulator::new(rust_config)
            .map_err(|e| PyValueError::new_err(format!("Invalid simulator config: {}", e)))?;

        Ok(PyPortfolioSimulator { inner })
    }

    /// Advance one day and return its snapshot dict, or `None` once the
    /// horizon has been consumed.
    fn step(&mut self, py: Python<'_>) -> PyResult<Option<Py<PyDict>>> {
        match self.inner.step() {
            Some(snapshot) => Ok(Some(snapshot_to_py(py, &snapshot)?)),
            None => Ok(None),
        }
    }

    /// Run the remaining horizon and return the list of daily snapshots.
    fn run(&mut self, py: Python<'_>) -> PyResult<Py<PyList>> {
        let snapshots = self.inner.run();
        snapshots_to_py(py, &snapshots)
    }

    /// Day the next `step()` will simulate.
    fn current_day(&self) -> usize {
        self.inner.current_day()
    }

    /// Signed aggregate capital right now.
    fn total_investment(&self) -> f64 {
        self.inner.total_investment()
    }

    /// Column labels for every investor ever created, aligned
    /// index-for-index with each snapshot's `ownership_pct` list.
    fn investor_labels(&self) -> Vec<String> {
        self.inner.portfolio().labels()
    }
}

/// Run the deterministic scenario projection in one call.
///
/// Accepts a configuration dict (missing keys fall back to defaults) and
/// returns the full projection: per-scenario value and drawdown series,
/// realized returns, fee rates, and the cumulative-contributions baseline.
///
/// Raises `ValueError` for an invalid configuration.
#[pyfunction]
pub fn project_scenarios(py: Python<'_>, config: &Bound<'_, PyDict>) -> PyResult<Py<PyDict>> {
    let rust_config = parse_scenario_config(config)?;

    let projection = crate::scenario::project_scenarios(&rust_config)
        .map_err(|e| PyValueError::new_err(format!("Invalid scenario config: {}", e)))?;

    projection_to_py(py, &projection)
}
