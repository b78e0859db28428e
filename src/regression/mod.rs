//! Polynomial least-squares regression of degree 1 to 3.

pub mod model;
pub mod solver;

pub use model::{FitMethod, PolynomialDegree, RegressionResult};
pub use solver::{fit, fit_all};
