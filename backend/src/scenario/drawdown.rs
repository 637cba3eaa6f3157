//! Running-peak drawdown
//!
//! Drawdown at each index is the percentage decline from the highest value
//! seen so far in the same series. The peak starts at the first value and
//! never decreases.

/// Compute the drawdown series for `values`, in percent.
///
/// `drawdown[i] = (peak - values[i]) / peak * 100` with a monotone running
/// peak. A non-positive peak reports `0.0` (the documented
/// degenerate-division policy, never a fault). Empty input yields an empty
/// series.
///
/// # Example
/// ```
/// use portfolio_simulator_core_rs::scenario::drawdown_series;
///
/// let dd = drawdown_series(&[100.0, 110.0, 99.0, 110.0, 121.0]);
/// assert_eq!(dd[0], 0.0);
/// assert_eq!(dd[1], 0.0);
/// assert!((dd[2] - 10.0).abs() < 1e-9);
/// assert_eq!(dd[4], 0.0);
/// ```
pub fn drawdown_series(values: &[f64]) -> Vec<f64> {
    let mut peak = match values.first() {
        Some(&first) => first,
        None => return Vec::new(),
    };

    values
        .iter()
        .map(|&value| {
            if value > peak {
                peak = value;
            }
            if peak <= 0.0 {
                0.0
            } else {
                (peak - value) / peak * 100.0
            }
        })
        .collect()
}
