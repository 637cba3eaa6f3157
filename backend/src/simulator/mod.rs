//! Portfolio simulator - stochastic day loop
//!
//! Advances a synthetic multi-investor portfolio one day at a time for a
//! fixed horizon, producing one `DailySnapshot` per day.
//!
//! See `engine.rs` for the implementation.

pub mod engine;

pub use engine::{simulate_portfolio, SimulationError, Simulator, SimulatorConfig};
