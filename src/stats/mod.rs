//! Descriptive statistics for one variable and its pairing with a second.
//!
//! Every value here is rounded to 2 decimals, the precision reports are
//! written at; later steps (deviations, covariance, correlation) build on the
//! rounded mean.

pub mod correlation;
pub mod descriptive;

use serde::Serialize;

use crate::data::model::Dataset;
use crate::error::Result;

use self::correlation::{correlation, Correlation, CorrelationSeed};
use self::descriptive::{covariance, deviations, mean, sample_std_dev};

/// Round to 2 decimals, ties to even (`0.125 -> 0.12`, `0.375 -> 0.38`).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// [`round2`] for printing: a result that rounds to zero is printed as
/// `0.00`, never `-0.00`.
pub fn display2(value: f64) -> f64 {
    let r = round2(value);
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

// ---------------------------------------------------------------------------
// StatisticsSummary
// ---------------------------------------------------------------------------

/// Statistics of the X variable, plus its covariance and correlation with Y.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub label: String,
    pub mean: f64,
    pub deviations: Vec<f64>,
    pub sample_std_dev: f64,
    /// Covariance with the paired (Y) variable.
    pub covariance: f64,
    pub correlation: Correlation,
}

impl StatisticsSummary {
    /// Compute every statistic for `dataset`.
    ///
    /// Fails with `EmptyDataset` for a table without rows and with
    /// `InsufficientPoints` for a single row, since the standard deviation
    /// needs two values.
    pub fn compute(dataset: &Dataset, seed: CorrelationSeed) -> Result<Self> {
        let x = dataset.x();
        let y = dataset.y();

        let summary = StatisticsSummary {
            label: dataset.x_label().to_string(),
            mean: mean(x)?,
            deviations: deviations(x)?,
            sample_std_dev: sample_std_dev(x)?,
            covariance: covariance(x, y)?,
            correlation: correlation(x, y, seed)?,
        };
        log::debug!(
            "{}: mean={:.2} sd={:.2} cov={:.2} r={:.2}",
            summary.label,
            summary.mean,
            summary.sample_std_dev,
            summary.covariance,
            summary.correlation.value
        );
        Ok(summary)
    }
}
