use std::fmt;

use serde::Serialize;

use crate::data::model::Dataset;
use crate::error::Result;
use crate::regression::{PolynomialDegree, RegressionResult};
use crate::stats::correlation::Correlation;
use crate::stats::descriptive::CovarianceDirection;
use crate::stats::{display2, StatisticsSummary};

// ---------------------------------------------------------------------------
// Report parts
// ---------------------------------------------------------------------------

/// `center ± half_width`. Not a statistical confidence interval: the half
/// width is the mean standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub center: f64,
    pub half_width: f64,
}

/// Outcome of one polynomial fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FitOutcome {
    Fitted(RegressionResult),
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionLine {
    pub degree: PolynomialDegree,
    pub outcome: FitOutcome,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Everything printed for one dataset.
///
/// Built by [`Report::assemble`] from values computed elsewhere; nothing is
/// recalculated here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub x_label: String,
    pub y_label: String,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    pub mean: f64,
    pub deviations: Vec<f64>,
    pub sample_std_dev: f64,
    pub confidence_interval: ConfidenceInterval,
    pub covariance: f64,
    pub covariance_direction: CovarianceDirection,
    pub correlation: Correlation,
    pub regressions: Vec<RegressionLine>,
    pub warnings: Vec<String>,
}

impl Report {
    pub fn assemble(
        dataset: &Dataset,
        summary: &StatisticsSummary,
        fits: Vec<(PolynomialDegree, Result<RegressionResult>)>,
    ) -> Self {
        let mut warnings = Vec::new();
        if let Some(w) = summary.correlation.warning() {
            warnings.push(w.to_string());
        }

        let regressions = fits
            .into_iter()
            .map(|(degree, result)| {
                let outcome = match result {
                    Ok(fit) => FitOutcome::Fitted(fit),
                    Err(e) => FitOutcome::Failed {
                        reason: e.to_string(),
                    },
                };
                RegressionLine { degree, outcome }
            })
            .collect();

        Report {
            x_label: dataset.x_label().to_string(),
            y_label: dataset.y_label().to_string(),
            x_values: dataset.x().to_vec(),
            y_values: dataset.y().to_vec(),
            mean: summary.mean,
            deviations: summary.deviations.clone(),
            sample_std_dev: summary.sample_std_dev,
            confidence_interval: ConfidenceInterval {
                center: summary.mean,
                half_width: summary.sample_std_dev,
            },
            covariance: summary.covariance,
            covariance_direction: CovarianceDirection::of(summary.covariance),
            correlation: summary.correlation,
            regressions,
            warnings,
        }
    }

    /// The report as text lines, each value at 2 decimals. Empty strings
    /// separate sections.
    pub fn lines(&self) -> Vec<String> {
        let x = &self.x_label;
        let y = &self.y_label;
        let mut out = vec![
            format!("{x} : {}", format_values(&self.x_values)),
            format!("{y} : {}", format_values(&self.y_values)),
            String::new(),
            format!("Average : {:.2}", display2(self.mean)),
            format!("Deviation (from average) : {}", format_values(&self.deviations)),
            format!("Mean standard deviation : {:.2}", display2(self.sample_std_dev)),
            format!(
                "Confidence interval : {:.2} ± {:.2}",
                display2(self.confidence_interval.center),
                display2(self.confidence_interval.half_width)
            ),
            String::new(),
            format!(
                "Covariance between {x} and {y} : {:.2}",
                display2(self.covariance)
            ),
        ];

        match self.covariance_direction {
            CovarianceDirection::Same => {
                out.push(format!("An increase of {x} might result in an increase of {y}."));
                out.push(format!("A decrease of {x} might result in a decrease of {y}."));
            }
            CovarianceDirection::Opposite => {
                out.push(format!("An increase of {x} might result in a decrease of {y}."));
                out.push(format!("A decrease of {x} might result in an increase of {y}."));
            }
            CovarianceDirection::Independent => {
                out.push(format!("Changes in {x} are not linearly reflected in {y}."));
            }
        }

        out.push(String::new());
        out.push(format!(
            "Correlation between {x} and {y} : {:.2}",
            display2(self.correlation.value)
        ));
        if let Some(w) = self.correlation.warning() {
            out.push(format!("Warning: {w}"));
        }
        out.push(self.correlation.class.phrase(x, y));

        out.push(String::new());
        for line in &self.regressions {
            let kind = line.degree.name();
            match &line.outcome {
                FitOutcome::Fitted(fit) => out.push(format!("{kind} regression : {fit}")),
                FitOutcome::Failed { reason } => {
                    out.push(format!("{kind} regression : unavailable ({reason})"))
                }
            }
        }

        out
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn format_values(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|&v| format!("{:.2}", display2(v))).collect();
    format!("[{}]", items.join(", "))
}
