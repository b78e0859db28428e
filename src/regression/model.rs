use std::fmt;

use serde::Serialize;

use crate::error::AnalysisError;
use crate::stats::display2;

// ---------------------------------------------------------------------------
// PolynomialDegree
// ---------------------------------------------------------------------------

/// Degree of a fitted polynomial. Only linear, quadratic and cubic fits are
/// supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum PolynomialDegree {
    Linear,
    Quadratic,
    Cubic,
}

impl PolynomialDegree {
    pub const ALL: [PolynomialDegree; 3] = [
        PolynomialDegree::Linear,
        PolynomialDegree::Quadratic,
        PolynomialDegree::Cubic,
    ];

    pub fn as_u8(self) -> u8 {
        match self {
            PolynomialDegree::Linear => 1,
            PolynomialDegree::Quadratic => 2,
            PolynomialDegree::Cubic => 3,
        }
    }

    /// Number of coefficients, `degree + 1`. Also the minimum number of
    /// points a fit needs.
    pub fn n_coeffs(self) -> usize {
        self.as_u8() as usize + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            PolynomialDegree::Linear => "Linear",
            PolynomialDegree::Quadratic => "Quadratic",
            PolynomialDegree::Cubic => "Cubic",
        }
    }
}

impl TryFrom<u8> for PolynomialDegree {
    type Error = AnalysisError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PolynomialDegree::Linear),
            2 => Ok(PolynomialDegree::Quadratic),
            3 => Ok(PolynomialDegree::Cubic),
            other => Err(AnalysisError::InvalidDegree(other)),
        }
    }
}

impl From<PolynomialDegree> for u8 {
    fn from(degree: PolynomialDegree) -> u8 {
        degree.as_u8()
    }
}

// ---------------------------------------------------------------------------
// RegressionResult
// ---------------------------------------------------------------------------

/// How the coefficients of a [`RegressionResult`] were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMethod {
    /// Least-squares polynomial fit.
    LeastSquares,
    /// Linear fit over a single repeated x-value: the slope is that x-value
    /// and the intercept is zero. Not a least-squares line.
    DegenerateVertical,
}

/// Coefficients of a fitted polynomial, highest power first:
/// `[a, b, c, d]` is `a·x³ + b·x² + c·x + d`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionResult {
    pub degree: PolynomialDegree,
    pub coefficients: Vec<f64>,
    pub method: FitMethod,
}

impl RegressionResult {
    /// Evaluate the polynomial at `x` (Horner's scheme).
    pub fn predict(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, c| acc * x + c)
    }

    /// Sum of squared residuals over the given points.
    pub fn sum_squared_residuals(&self, x: &[f64], y: &[f64]) -> f64 {
        x.iter()
            .zip(y)
            .map(|(&xi, &yi)| {
                let r = yi - self.predict(xi);
                r * r
            })
            .sum()
    }
}

/// Renders `Y = a * X^2 + b * X + c` with 2-decimal coefficients.
impl fmt::Display for RegressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y =")?;
        let top = self.coefficients.len().saturating_sub(1);
        for (i, &c) in self.coefficients.iter().enumerate() {
            let c = display2(c);
            if i > 0 {
                write!(f, " +")?;
            }
            match top - i {
                0 => write!(f, " {c:.2}")?,
                1 => write!(f, " {c:.2} * X")?,
                power => write!(f, " {c:.2} * X^{power}")?,
            }
        }
        Ok(())
    }
}
