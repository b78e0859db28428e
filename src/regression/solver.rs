use nalgebra::{DMatrix, DVector};

use super::model::{FitMethod, PolynomialDegree, RegressionResult};
use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Least-squares polynomial fit of `y` against `x`.
///
/// Checks run in this order:
/// 1. fewer than `degree + 1` points → `InsufficientPoints`;
/// 2. linear fit over one repeated x-value → degenerate vertical line;
/// 3. fewer than `degree + 1` distinct x-values → `SingularFit`;
/// 4. otherwise solve the least-squares problem on centred and scaled x.
pub fn fit(x: &[f64], y: &[f64], degree: PolynomialDegree) -> Result<RegressionResult> {
    if x.len() != y.len() {
        return Err(AnalysisError::MismatchedLengths {
            x_len: x.len(),
            y_len: y.len(),
        });
    }

    let needed = degree.n_coeffs();
    if x.len() < needed {
        return Err(AnalysisError::InsufficientPoints {
            needed,
            found: x.len(),
        });
    }

    if degree == PolynomialDegree::Linear && is_vertical(x) {
        return Ok(vertical_line(x[0]));
    }

    let distinct = count_distinct(x);
    if distinct < needed {
        return Err(AnalysisError::SingularFit {
            degree: degree.as_u8(),
            reason: format!("only {distinct} distinct x-values, need {needed}"),
        });
    }

    let mut coefficients = solve_least_squares(x, y, degree)?;
    // Solver order is constant term first.
    coefficients.reverse();

    log::debug!("{} fit: {:?}", degree.name(), coefficients);
    Ok(RegressionResult {
        degree,
        coefficients,
        method: FitMethod::LeastSquares,
    })
}

/// Fit every supported degree independently. A failure at one degree does
/// not affect the others.
pub fn fit_all(x: &[f64], y: &[f64]) -> Vec<(PolynomialDegree, Result<RegressionResult>)> {
    PolynomialDegree::ALL
        .iter()
        .map(|&degree| {
            let result = fit(x, y, degree);
            if let Err(e) = &result {
                log::warn!("{} regression failed: {e}", degree.name());
            }
            (degree, result)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Degenerate input
// ---------------------------------------------------------------------------

fn is_vertical(x: &[f64]) -> bool {
    x.iter().all(|&v| v == x[0])
}

/// All points share one x-value, so `AᵀA` is singular. The line is reported
/// as `slope = x`, `intercept = 0`.
fn vertical_line(x_constant: f64) -> RegressionResult {
    log::debug!("All x-values equal {x_constant}; using the vertical-line fallback");
    RegressionResult {
        degree: PolynomialDegree::Linear,
        coefficients: vec![x_constant, 0.0],
        method: FitMethod::DegenerateVertical,
    }
}

fn count_distinct(x: &[f64]) -> usize {
    let mut sorted = x.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

// ---------------------------------------------------------------------------
// Least squares
// ---------------------------------------------------------------------------

/// Singular values below this fraction of the largest one count as zero.
const RANK_TOLERANCE: f64 = 1e-12;

/// Least-squares coefficients of `y ≈ Σ cₖ xᵏ`, constant term first.
///
/// The design matrix is built over `t = (x - center) / scale`, which keeps
/// every column within `[-1, 1]`, and is solved by SVD without forming `AᵀA`.
fn solve_least_squares(x: &[f64], y: &[f64], degree: PolynomialDegree) -> Result<Vec<f64>> {
    let singular = |reason: &str| AnalysisError::SingularFit {
        degree: degree.as_u8(),
        reason: reason.to_string(),
    };

    let n_coeffs = degree.n_coeffs();
    let center = x.iter().sum::<f64>() / x.len() as f64;
    let scale = x.iter().fold(0.0_f64, |acc, &v| acc.max((v - center).abs()));
    if !(scale > 0.0 && scale.is_finite()) {
        return Err(singular("x-values have no usable spread"));
    }

    let design = DMatrix::from_fn(x.len(), n_coeffs, |i, j| {
        ((x[i] - center) / scale).powi(j as i32)
    });
    let rhs = DVector::from_column_slice(y);

    let svd = design.svd(true, true);
    let largest = svd.singular_values.max();
    if svd.rank(largest * RANK_TOLERANCE) < n_coeffs {
        return Err(singular("design matrix is rank deficient"));
    }
    let scaled = svd
        .solve(&rhs, largest * RANK_TOLERANCE)
        .map_err(singular)?;

    let coefficients = expand_scaled(scaled.as_slice(), center, scale);
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(singular("solution contains non-finite coefficients"));
    }
    Ok(coefficients)
}

/// Rewrite `Σ cₖ ((x - center) / scale)ᵏ` as `Σ aⱼ xʲ`. Both sides are
/// constant term first.
fn expand_scaled(scaled: &[f64], center: f64, scale: f64) -> Vec<f64> {
    let mut coefficients = vec![0.0; scaled.len()];
    // ((x - center) / scale)^k, constant term first
    let mut power = vec![1.0];
    for (k, &ck) in scaled.iter().enumerate() {
        if k > 0 {
            let mut next = vec![0.0; power.len() + 1];
            for (j, &p) in power.iter().enumerate() {
                next[j + 1] += p / scale;
                next[j] -= p * center / scale;
            }
            power = next;
        }
        for (j, &p) in power.iter().enumerate() {
            coefficients[j] += ck * p;
        }
    }
    coefficients
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_values_ignore_order_and_repeats() {
        assert_eq!(count_distinct(&[3.0, 1.0, 3.0, 2.0, 1.0]), 3);
        assert_eq!(count_distinct(&[0.0]), 1);
    }

    #[test]
    fn least_squares_recovers_exact_line() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 3.0, 5.0];
        let c = solve_least_squares(&x, &y, PolynomialDegree::Linear).unwrap();
        assert!((c[0] - 1.0).abs() < 1e-9);
        assert!((c[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn expand_scaled_shifts_back_to_x() {
        // t = (x - 3) / 2; 1 + 2t + 4t² = x² - 5x + 7
        let c = expand_scaled(&[1.0, 2.0, 4.0], 3.0, 2.0);
        assert!((c[0] - 7.0).abs() < 1e-12);
        assert!((c[1] + 5.0).abs() < 1e-12);
        assert!((c[2] - 1.0).abs() < 1e-12);
    }
}
