//! Portfolio Simulator Core - Rust Engine
//!
//! Numeric engines behind the investment dashboard: a stochastic
//! multi-investor portfolio simulation and a deterministic multi-scenario
//! growth projection. The dashboard renders whatever these engines return;
//! nothing here touches I/O or UI.
//!
//! # Architecture
//!
//! - **models**: Domain types (Investor, Portfolio, DailySnapshot)
//! - **simulator**: Stochastic day loop (exits, fee drag, acquisition)
//! - **scenario**: Deterministic weekly growth paths and drawdowns
//! - **fees**: Data-driven performance-fee schedule
//! - **rng**: Deterministic random number generation
//! - **ffi**: PyO3 boundary for the dashboard (feature "pyo3")
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG); same seed + same
//!    config = identical series
//! 2. Engines are pure: each run owns its state, returns a complete
//!    series, and leaves nothing behind
//! 3. Degenerate arithmetic (non-positive capital or peak) yields defined
//!    zero sentinels, never a fault

// Module declarations
pub mod fees;
pub mod models;
pub mod rng;
pub mod scenario;
pub mod simulator;

// Re-exports for convenience
pub use fees::{FeeSchedule, FeeScheduleError, FeeTier, LockBucket};
pub use models::{DailySnapshot, ExitOutcome, Investor, Portfolio};
pub use rng::RngManager;
pub use scenario::{
    project_scenarios, ContributionFrequency, ProjectionError, ScenarioConfig, ScenarioKind,
    ScenarioPath, ScenarioProjection, ScenarioRates,
};
pub use simulator::{simulate_portfolio, SimulationError, Simulator, SimulatorConfig};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn portfolio_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::simulator::PyPortfolioSimulator>()?;
    m.add_function(wrap_pyfunction!(ffi::simulator::project_scenarios, m)?)?;
    Ok(())
}
