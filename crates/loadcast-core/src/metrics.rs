//! Forecast accuracy scoring.
//!
//! The three metrics are expressed as percentages of the validation split's
//! peak, a scale convention inherited from the system this pipeline reports
//! into rather than a textbook normalization:
//!
//! - `MAE% = mean(|a − p|) / max(a) × 100`
//! - `MSE% = mean((a − p)²) / max(a²) × 100`
//! - `RMSE% = sqrt(mean((a − p)²)) / max(a) × 100`
//!
//! Note the MSE denominator is the peak of the squared actuals, `max(a²)`,
//! which differs from `max(a)²` whenever the largest magnitude is negative.

use serde::{Deserialize, Serialize};

use crate::error::{LoadcastError, Result};

/// Accuracy of one workload's forecast against its validation actuals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    /// Mean absolute error as a percentage of the validation peak.
    pub mae_pct: f64,
    /// Mean squared error as a percentage of the peak squared actual.
    pub mse_pct: f64,
    /// Root mean squared error as a percentage of the validation peak.
    pub rmse_pct: f64,
}

/// Scores the last N predicted values against the N validation actuals.
///
/// `actual` and `predicted` are compared by index position and must have the
/// same non-zero length.
///
/// # Errors
///
/// - [`LoadcastError::EmptyValidation`] when the slices are empty or their
///   lengths differ.
/// - [`LoadcastError::ZeroPeak`] when `max(actual)` is zero, which would make
///   the percentages non-finite.
pub fn score(workload: &str, actual: &[f64], predicted: &[f64]) -> Result<AccuracyMetrics> {
    if actual.is_empty() || actual.len() != predicted.len() {
        return Err(LoadcastError::EmptyValidation {
            workload: workload.to_string(),
        });
    }

    let n = actual.len() as f64;
    let mae_raw = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n;
    let mse_raw = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p) * (a - p))
        .sum::<f64>()
        / n;

    let peak = actual.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let peak_squared = actual
        .iter()
        .map(|a| a * a)
        .fold(f64::NEG_INFINITY, f64::max);
    if peak == 0.0 || peak_squared == 0.0 {
        return Err(LoadcastError::ZeroPeak {
            workload: workload.to_string(),
        });
    }

    Ok(AccuracyMetrics {
        mae_pct: mae_raw / peak * 100.0,
        mse_pct: mse_raw / peak_squared * 100.0,
        rmse_pct: mse_raw.sqrt() / peak * 100.0,
    })
}
