//! Tests for the polynomial least-squares solver.
//!
//! ## Test Organization
//!
//! 1. **Exact fits** - data lying on a polynomial of the fitted degree
//! 2. **Degenerate input** - vertical-line fallback for degree 1
//! 3. **Failures** - insufficient points, singular systems
//! 4. **Optimality** - least-squares residual is minimal
//! 5. **Evaluation** - prediction and residuals

use approx::{assert_abs_diff_eq, assert_relative_eq};

use rusty_stats::regression::{fit, fit_all, FitMethod, PolynomialDegree, RegressionResult};
use rusty_stats::AnalysisError;

// ============================================================================
// Helper Functions
// ============================================================================

fn assert_coefficients(fit: &RegressionResult, expected: &[f64], eps: f64) {
    assert_eq!(fit.coefficients.len(), expected.len());
    for (got, want) in fit.coefficients.iter().zip(expected) {
        assert_abs_diff_eq!(*got, *want, epsilon = eps);
    }
}

// ============================================================================
// Exact Fit Tests
// ============================================================================

#[test]
fn test_linear_fit_exact_line() {
    let result = fit(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0], PolynomialDegree::Linear)
        .unwrap();
    assert_eq!(result.degree, PolynomialDegree::Linear);
    assert_eq!(result.method, FitMethod::LeastSquares);
    assert_coefficients(&result, &[2.0, 0.0], 1e-9);
}

#[test]
fn test_quadratic_fit_exact_parabola() {
    // y = 2x² - 3x + 1
    let x = [0.0, 1.0, 2.0, 3.0, 4.0];
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v * v - 3.0 * v + 1.0).collect();
    let result = fit(&x, &y, PolynomialDegree::Quadratic).unwrap();
    assert_coefficients(&result, &[2.0, -3.0, 1.0], 1e-8);
}

#[test]
fn test_cubic_fit_exact_cubic() {
    // y = x³ - 2x + 5
    let x = [-2.0, -1.0, 0.0, 1.0, 2.0, 3.0];
    let y: Vec<f64> = x.iter().map(|v| v * v * v - 2.0 * v + 5.0).collect();
    let result = fit(&x, &y, PolynomialDegree::Cubic).unwrap();
    assert_coefficients(&result, &[1.0, 0.0, -2.0, 5.0], 1e-7);
}

#[test]
fn test_cubic_fit_far_from_origin() {
    // y = 0.5t³ - 2t² + 3t + 7 with t = x - 2005
    let x: Vec<f64> = (2000..=2010).map(f64::from).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|v| {
            let t = v - 2005.0;
            0.5 * t * t * t - 2.0 * t * t + 3.0 * t + 7.0
        })
        .collect();

    let result = fit(&x, &y, PolynomialDegree::Cubic).unwrap();
    let expected = [0.5, -3009.5, 6038060.5, -4038121120.5];
    for (got, want) in result.coefficients.iter().zip(expected) {
        assert_relative_eq!(*got, want, max_relative = 1e-6);
    }
    assert!(result.sum_squared_residuals(&x, &y) < 1e-4);
    assert_abs_diff_eq!(result.predict(2007.0), 9.0, epsilon = 1e-3);
}

#[test]
fn test_minimum_points_interpolate() {
    // three points determine a parabola exactly
    let result = fit(&[-1.0, 0.0, 1.0], &[2.0, 1.0, 2.0], PolynomialDegree::Quadratic).unwrap();
    assert_coefficients(&result, &[1.0, 0.0, 1.0], 1e-9);
}

// ============================================================================
// Degenerate Input Tests
// ============================================================================

#[test]
fn test_vertical_line_fallback() {
    let result = fit(&[1.0, 1.0, 1.0, 1.0], &[5.0, 3.0, 9.0, 1.0], PolynomialDegree::Linear)
        .unwrap();
    assert_eq!(result.method, FitMethod::DegenerateVertical);
    assert_eq!(result.coefficients, vec![1.0, 0.0]);
}

#[test]
fn test_vertical_line_ignores_y() {
    for y in [[0.0, 0.0], [-4.0, 100.0], [7.5, 7.5]] {
        let result = fit(&[-3.25, -3.25], &y, PolynomialDegree::Linear).unwrap();
        assert_eq!(result.coefficients, vec![-3.25, 0.0]);
    }
}

#[test]
fn test_vertical_input_is_singular_above_degree_one() {
    let x = [2.0; 5];
    let y = [1.0, 2.0, 3.0, 4.0, 5.0];
    for degree in [PolynomialDegree::Quadratic, PolynomialDegree::Cubic] {
        assert!(matches!(
            fit(&x, &y, degree),
            Err(AnalysisError::SingularFit { .. })
        ));
    }
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_insufficient_points_per_degree() {
    for degree in PolynomialDegree::ALL {
        let n = degree.as_u8() as usize;
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y = x.clone();
        match fit(&x, &y, degree) {
            Err(AnalysisError::InsufficientPoints { needed, found }) => {
                assert_eq!(needed, n + 1);
                assert_eq!(found, n);
            }
            other => panic!("degree {}: expected InsufficientPoints, got {other:?}", n),
        }
    }
}

#[test]
fn test_insufficient_points_before_vertical_fallback() {
    assert!(matches!(
        fit(&[3.0], &[1.0], PolynomialDegree::Linear),
        Err(AnalysisError::InsufficientPoints {
            needed: 2,
            found: 1
        })
    ));
    assert!(matches!(
        fit(&[], &[], PolynomialDegree::Linear),
        Err(AnalysisError::InsufficientPoints {
            needed: 2,
            found: 0
        })
    ));
}

#[test]
fn test_too_few_distinct_x_is_singular() {
    let result = fit(&[1.0, 1.0, 2.0, 2.0], &[1.0, 2.0, 3.0, 4.0], PolynomialDegree::Quadratic);
    match result {
        Err(AnalysisError::SingularFit { degree, .. }) => assert_eq!(degree, 2),
        other => panic!("expected SingularFit, got {other:?}"),
    }
}

#[test]
fn test_mismatched_lengths() {
    assert!(matches!(
        fit(&[1.0, 2.0, 3.0], &[1.0, 2.0], PolynomialDegree::Linear),
        Err(AnalysisError::MismatchedLengths { x_len: 3, y_len: 2 })
    ));
}

#[test]
fn test_fit_all_keeps_lower_degrees() {
    let results = fit_all(&[0.0, 1.0, 2.0], &[1.0, 2.0, 5.0]);
    assert_eq!(results.len(), 3);

    assert_eq!(results[0].0, PolynomialDegree::Linear);
    assert!(results[0].1.is_ok());
    assert_eq!(results[1].0, PolynomialDegree::Quadratic);
    assert!(results[1].1.is_ok());
    assert_eq!(results[2].0, PolynomialDegree::Cubic);
    assert!(matches!(
        results[2].1,
        Err(AnalysisError::InsufficientPoints {
            needed: 4,
            found: 3
        })
    ));
}

// ============================================================================
// Optimality Tests
// ============================================================================

#[test]
fn test_linear_fit_minimizes_residuals() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let y = [1.2, 2.9, 5.3, 6.8, 9.4, 10.7, 13.1];
    let best = fit(&x, &y, PolynomialDegree::Linear).unwrap();
    let best_ssr = best.sum_squared_residuals(&x, &y);

    for ds in [-0.1, -0.01, 0.01, 0.1] {
        for di in [-0.1, -0.01, 0.0, 0.01, 0.1] {
            let other = RegressionResult {
                coefficients: vec![best.coefficients[0] + ds, best.coefficients[1] + di],
                ..best.clone()
            };
            let ssr = other.sum_squared_residuals(&x, &y);
            assert!(
                best_ssr <= ssr * (1.0 + 1e-6),
                "perturbed line ({ds}, {di}) has lower SSR: {ssr} < {best_ssr}"
            );
        }
    }
}

#[test]
fn test_higher_degree_never_fits_worse() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let y = [1.0, 0.2, 0.9, 3.1, 7.2, 12.5, 19.8];
    let ssr: Vec<f64> = PolynomialDegree::ALL
        .iter()
        .map(|&d| fit(&x, &y, d).unwrap().sum_squared_residuals(&x, &y))
        .collect();
    assert!(ssr[1] <= ssr[0] * (1.0 + 1e-9));
    assert!(ssr[2] <= ssr[1] * (1.0 + 1e-9));
}

#[test]
fn test_higher_degree_never_fits_worse_on_offset_x() {
    let x: Vec<f64> = (2000..=2010).map(f64::from).collect();
    let y = [3.1, 4.0, 4.2, 6.3, 5.9, 8.8, 9.1, 12.5, 11.7, 15.2, 18.9];
    let ssr: Vec<f64> = PolynomialDegree::ALL
        .iter()
        .map(|&d| fit(&x, &y, d).unwrap().sum_squared_residuals(&x, &y))
        .collect();
    assert!(ssr[1] <= ssr[0] * (1.0 + 1e-6), "{ssr:?}");
    assert!(ssr[2] <= ssr[1] * (1.0 + 1e-6), "{ssr:?}");
}

// ============================================================================
// Evaluation Tests
// ============================================================================

#[test]
fn test_predict_highest_power_first() {
    let cubic = RegressionResult {
        degree: PolynomialDegree::Cubic,
        coefficients: vec![1.0, -2.0, 0.5, 3.0],
        method: FitMethod::LeastSquares,
    };
    // 8 - 8 + 1 + 3
    assert_relative_eq!(cubic.predict(2.0), 4.0);
    assert_relative_eq!(cubic.predict(0.0), 3.0);
}

#[test]
fn test_exact_fit_has_no_residual() {
    let x = [1.0, 2.0, 3.0, 4.0];
    let y = [2.0, 4.0, 6.0, 8.0];
    let result = fit(&x, &y, PolynomialDegree::Linear).unwrap();
    assert_abs_diff_eq!(result.sum_squared_residuals(&x, &y), 0.0, epsilon = 1e-12);
}
