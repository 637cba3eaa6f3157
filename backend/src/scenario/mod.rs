//! Scenario projector - deterministic growth paths
//!
//! Projects three named compounding paths (pessimistic / moderate /
//! optimistic) over a normalized weekly axis, alongside a
//! pure-contributions baseline, with per-path drawdown series, realized
//! returns, and performance-fee lookups.

pub mod drawdown;
pub mod projector;

pub use drawdown::drawdown_series;
pub use projector::{
    project_scenarios, weekly_rate, ContributionFrequency, ProjectionError, ScenarioConfig,
    ScenarioKind, ScenarioPath, ScenarioProjection, ScenarioRates,
};
