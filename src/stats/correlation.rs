use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

use super::descriptive::{check_paired, mean};
use super::round2;

// ---------------------------------------------------------------------------
// Accumulator seed
// ---------------------------------------------------------------------------

/// Starting value of the Pearson numerator accumulator.
///
/// `Legacy` starts the sum of products at `1.0` instead of `0.0`, which adds
/// `1 / (sqrt(Sxx)·sqrt(Syy))` to the coefficient and can push it past 1.
/// It exists only to reproduce reports produced by older tooling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationSeed {
    #[default]
    Zero,
    Legacy,
}

impl CorrelationSeed {
    fn initial(self) -> f64 {
        match self {
            CorrelationSeed::Zero => 0.0,
            CorrelationSeed::Legacy => 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Slack for floating-point error on perfectly correlated data.
const RANGE_TOLERANCE: f64 = 1e-9;

/// A Pearson coefficient together with its strength class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlation {
    /// Coefficient rounded to 2 decimals.
    pub value: f64,
    pub class: CorrelationClass,
    /// `false` when the coefficient fell outside `[-1, 1]`.
    pub in_range: bool,
}

impl Correlation {
    /// The out-of-range warning, if any.
    pub fn warning(&self) -> Option<AnalysisError> {
        (!self.in_range).then_some(AnalysisError::CorrelationOutOfRange(self.value))
    }
}

/// Pearson correlation coefficient of `x` and `y`, rounded to 2 decimals.
///
/// A constant variable yields exactly `0.0`. A value outside `[-1, 1]` is
/// still returned but flagged and logged as
/// [`AnalysisError::CorrelationOutOfRange`].
pub fn correlation(x: &[f64], y: &[f64], seed: CorrelationSeed) -> Result<Correlation> {
    check_paired(x, y)?;
    let x_avg = mean(x)?;
    let y_avg = mean(y)?;

    let mut sum_prod = seed.initial();
    let mut x_sum_sq = 0.0;
    let mut y_sum_sq = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - x_avg;
        let dy = yi - y_avg;
        sum_prod += dx * dy;
        x_sum_sq += dx * dx;
        y_sum_sq += dy * dy;
    }

    // The means are rounded, so a constant column can still leave a tiny
    // non-zero sum of squares.
    if is_constant(x) || is_constant(y) || x_sum_sq == 0.0 || y_sum_sq == 0.0 {
        return Ok(Correlation {
            value: 0.0,
            class: CorrelationClass::None,
            in_range: true,
        });
    }

    let raw = sum_prod / (x_sum_sq.sqrt() * y_sum_sq.sqrt());
    let in_range = raw.abs() <= 1.0 + RANGE_TOLERANCE;
    if !in_range {
        log::warn!("{}", AnalysisError::CorrelationOutOfRange(raw));
    }

    let value = round2(raw);
    Ok(Correlation {
        value,
        class: classify(value),
        in_range,
    })
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

// ---------------------------------------------------------------------------
// Strength classification
// ---------------------------------------------------------------------------

/// Qualitative strength of a correlation, by absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationClass {
    None,
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
    Perfect,
}

/// Classify a coefficient. Each bracket includes its upper edge:
/// `(0, 0.2]` is very weak, `(0.2, 0.4]` weak and so on, `(0.8, 1)` very
/// strong and `1` perfect. The sign is ignored; `NaN` is no correlation.
pub fn classify(corr: f64) -> CorrelationClass {
    let r = corr.abs();
    if r == 0.0 || r.is_nan() {
        CorrelationClass::None
    } else if r <= 0.2 {
        CorrelationClass::VeryWeak
    } else if r <= 0.4 {
        CorrelationClass::Weak
    } else if r <= 0.6 {
        CorrelationClass::Moderate
    } else if r <= 0.8 {
        CorrelationClass::Strong
    } else if r < 1.0 {
        CorrelationClass::VeryStrong
    } else {
        CorrelationClass::Perfect
    }
}

impl CorrelationClass {
    /// Sentence describing the relationship between two named variables.
    pub fn phrase(self, x_label: &str, y_label: &str) -> String {
        match self {
            CorrelationClass::None => {
                format!("There is no correlation between {x_label} and {y_label}.")
            }
            CorrelationClass::Perfect => format!("{x_label} and {y_label} are correlated."),
            other => format!("Between {x_label} and {y_label}, there is a {other} correlation."),
        }
    }
}

impl fmt::Display for CorrelationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CorrelationClass::None => "NO",
            CorrelationClass::VeryWeak => "VERY WEAK",
            CorrelationClass::Weak => "WEAK",
            CorrelationClass::Moderate => "MODERATE",
            CorrelationClass::Strong => "STRONG",
            CorrelationClass::VeryStrong => "VERY STRONG",
            CorrelationClass::Perfect => "PERFECT",
        };
        write!(f, "{s}")
    }
}
