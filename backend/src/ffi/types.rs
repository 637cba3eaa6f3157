//! Type conversion utilities for the FFI boundary
//!
//! Converts between Python dicts and the Rust configuration/result types.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::fees::{FeeSchedule, FeeTier};
use crate::models::DailySnapshot;
use crate::scenario::{ContributionFrequency, ScenarioConfig, ScenarioProjection, ScenarioRates};
use crate::simulator::SimulatorConfig;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with a clear error message.
fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract an optional field; `None` when the key is absent.
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => Ok(Some(value.extract()?)),
        None => Ok(None),
    }
}

/// Extract a field, falling back to a default when the key is absent.
fn extract_with_default<'py, T>(dict: &Bound<'py, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert a Python dict to a `SimulatorConfig`.
///
/// Every field falls back to the documented default when absent, so a
/// dashboard can pass only the sliders it exposes.
pub fn parse_simulator_config(py_config: &Bound<'_, PyDict>) -> PyResult<SimulatorConfig> {
    let defaults = SimulatorConfig::default();

    Ok(SimulatorConfig {
        horizon_days: extract_with_default(py_config, "horizon_days", defaults.horizon_days)?,
        investment_range: extract_with_default(
            py_config,
            "investment_range",
            defaults.investment_range,
        )?,
        lock_period_options: extract_with_default(
            py_config,
            "lock_period_options",
            defaults.lock_period_options,
        )?,
        initial_investor_count: extract_with_default(
            py_config,
            "initial_investor_count",
            defaults.initial_investor_count,
        )?,
        new_investor_daily_probability: extract_with_default(
            py_config,
            "new_investor_daily_probability",
            defaults.new_investor_daily_probability,
        )?,
        early_withdrawal_penalty_rate: extract_with_default(
            py_config,
            "early_withdrawal_penalty_rate",
            defaults.early_withdrawal_penalty_rate,
        )?,
        early_withdrawal_daily_probability: extract_with_default(
            py_config,
            "early_withdrawal_daily_probability",
            defaults.early_withdrawal_daily_probability,
        )?,
        post_lock_exit_probability: extract_with_default(
            py_config,
            "post_lock_exit_probability",
            defaults.post_lock_exit_probability,
        )?,
        annual_management_fee_rate: extract_with_default(
            py_config,
            "annual_management_fee_rate",
            defaults.annual_management_fee_rate,
        )?,
        rng_seed: extract_with_default(py_config, "rng_seed", defaults.rng_seed)?,
    })
}

/// Convert a Python dict to a `ScenarioConfig`.
///
/// `contribution_frequency` is a string ("weekly" | "monthly" |
/// "quarterly"); `annual_rates` an optional `[pessimistic, moderate,
/// optimistic]` triple; `fee_schedule` an optional per-bucket tier listing
/// of `[max_return_pct | None, rate]` pairs.
pub fn parse_scenario_config(py_config: &Bound<'_, PyDict>) -> PyResult<ScenarioConfig> {
    let defaults = ScenarioConfig::default();

    let contribution_frequency =
        match extract_optional::<String>(py_config, "contribution_frequency")? {
            Some(raw) => parse_frequency(&raw)?,
            None => defaults.contribution_frequency,
        };

    let annual_rates = match extract_optional::<(f64, f64, f64)>(py_config, "annual_rates")? {
        Some((pessimistic, moderate, optimistic)) => ScenarioRates {
            pessimistic,
            moderate,
            optimistic,
        },
        None => defaults.annual_rates,
    };

    let fee_schedule = match py_config.get_item("fee_schedule")? {
        Some(value) => parse_fee_schedule(&value.downcast_into::<PyDict>()?)?,
        None => defaults.fee_schedule,
    };

    Ok(ScenarioConfig {
        initial_capital: extract_with_default(
            py_config,
            "initial_capital",
            defaults.initial_capital,
        )?,
        periodic_contribution: extract_with_default(
            py_config,
            "periodic_contribution",
            defaults.periodic_contribution,
        )?,
        contribution_frequency,
        horizon_periods: extract_with_default(
            py_config,
            "horizon_periods",
            defaults.horizon_periods,
        )?,
        lock_period_months: extract_with_default(
            py_config,
            "lock_period_months",
            defaults.lock_period_months,
        )?,
        include_contributions: extract_with_default(
            py_config,
            "include_contributions",
            defaults.include_contributions,
        )?,
        annual_rates,
        fee_schedule,
    })
}

fn parse_frequency(raw: &str) -> PyResult<ContributionFrequency> {
    match raw {
        "weekly" => Ok(ContributionFrequency::Weekly),
        "monthly" => Ok(ContributionFrequency::Monthly),
        "quarterly" => Ok(ContributionFrequency::Quarterly),
        other => Err(PyValueError::new_err(format!(
            "Unknown contribution_frequency '{}' (expected weekly | monthly | quarterly)",
            other
        ))),
    }
}

fn parse_fee_schedule(py_schedule: &Bound<'_, PyDict>) -> PyResult<FeeSchedule> {
    let six: Vec<(Option<f64>, f64)> = extract_required(py_schedule, "six_months")?;
    let twelve: Vec<(Option<f64>, f64)> = extract_required(py_schedule, "twelve_months")?;

    let to_tiers = |pairs: Vec<(Option<f64>, f64)>| -> Vec<FeeTier> {
        pairs
            .into_iter()
            .map(|(max_return_pct, rate)| FeeTier {
                max_return_pct,
                rate,
            })
            .collect()
    };

    FeeSchedule::new(to_tiers(six), to_tiers(twelve))
        .map_err(|e| PyValueError::new_err(format!("Invalid fee schedule: {}", e)))
}

// ========================================================================
// Result Converters
// ========================================================================

/// Convert a `DailySnapshot` to a Python dict.
///
/// Keys: `day`, `total_investment`, `active_investor_count`,
/// `ownership_pct` (list aligned with the simulator's investor labels).
pub fn snapshot_to_py(py: Python<'_>, snapshot: &DailySnapshot) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("day", snapshot.day)?;
    dict.set_item("total_investment", snapshot.total_investment)?;
    dict.set_item("active_investor_count", snapshot.active_investor_count)?;
    dict.set_item("ownership_pct", snapshot.ownership_pct.clone())?;
    Ok(dict.into())
}

/// Convert a full `ScenarioProjection` to a Python dict.
///
/// Layout:
/// ```text
/// {
///   "weeks": int,
///   "cumulative_contributions": [float, ...],
///   "paths": {
///     "pessimistic": { "values": [...], "drawdown_pct": [...],
///                       "realized_return_pct": float, "fee_rate": float },
///     "moderate":   { ... },
///     "optimistic": { ... },
///   },
/// }
/// ```
pub fn projection_to_py(py: Python<'_>, projection: &ScenarioProjection) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("weeks", projection.weeks)?;
    dict.set_item(
        "cumulative_contributions",
        projection.cumulative_contributions.clone(),
    )?;

    let paths = PyDict::new(py);
    for path in &projection.paths {
        let entry = PyDict::new(py);
        entry.set_item("values", path.values.clone())?;
        entry.set_item("drawdown_pct", path.drawdown_pct.clone())?;
        entry.set_item("realized_return_pct", path.realized_return_pct)?;
        entry.set_item("fee_rate", path.fee_rate)?;
        paths.set_item(path.kind.label(), entry)?;
    }
    dict.set_item("paths", paths)?;

    Ok(dict.into())
}

/// Convert a snapshot series to a Python list of dicts.
pub fn snapshots_to_py(py: Python<'_>, snapshots: &[DailySnapshot]) -> PyResult<Py<PyList>> {
    let list = PyList::empty(py);
    for snapshot in snapshots {
        list.append(snapshot_to_py(py, snapshot)?)?;
    }
    Ok(list.into())
}
