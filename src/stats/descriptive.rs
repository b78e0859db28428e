use crate::error::{AnalysisError, Result};

use super::round2;

// ---------------------------------------------------------------------------
// Single-variable statistics
// ---------------------------------------------------------------------------

/// Arithmetic mean, rounded to 2 decimals.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    let sum: f64 = values.iter().sum();
    Ok(round2(sum / values.len() as f64))
}

/// Distance of every value from the (rounded) mean, each rounded to 2
/// decimals. Order follows `values`.
pub fn deviations(values: &[f64]) -> Result<Vec<f64>> {
    let avg = mean(values)?;
    Ok(values.iter().map(|v| round2(v - avg)).collect())
}

/// Standard deviation of the mean: `sqrt(Σd² / (n·(n-1)))` over the rounded
/// deviations, rounded to 2 decimals.
///
/// The `n·(n-1)` denominator makes this the standard error of the mean rather
/// than the sample standard deviation; reports label it "mean standard
/// deviation".
pub fn sample_std_dev(values: &[f64]) -> Result<f64> {
    let n = values.len();
    if n == 0 {
        return Err(AnalysisError::EmptyDataset);
    }
    if n == 1 {
        return Err(AnalysisError::InsufficientPoints {
            needed: 2,
            found: 1,
        });
    }

    let sum_sq: f64 = deviations(values)?.iter().map(|d| d * d).sum();
    let n = n as f64;
    Ok(round2((sum_sq / (n * (n - 1.0))).sqrt()))
}

// ---------------------------------------------------------------------------
// Paired statistics
// ---------------------------------------------------------------------------

/// Population covariance `Σ(xᵢ-x̄)(yᵢ-ȳ) / n` using the rounded means,
/// rounded to 2 decimals.
pub fn covariance(x: &[f64], y: &[f64]) -> Result<f64> {
    check_paired(x, y)?;
    let x_avg = mean(x)?;
    let y_avg = mean(y)?;

    let sum: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - x_avg) * (yi - y_avg))
        .sum();
    Ok(round2(sum / x.len() as f64))
}

/// Sign of a covariance, as read by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CovarianceDirection {
    /// Both variables tend to move the same way.
    Same,
    /// One variable tends to fall while the other rises.
    Opposite,
    /// Zero covariance.
    Independent,
}

impl CovarianceDirection {
    pub fn of(covariance: f64) -> Self {
        if covariance > 0.0 {
            CovarianceDirection::Same
        } else if covariance < 0.0 {
            CovarianceDirection::Opposite
        } else {
            CovarianceDirection::Independent
        }
    }
}

pub(crate) fn check_paired(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(AnalysisError::MismatchedLengths {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    Ok(())
}
