use serde::Serialize;

use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Dataset – two labelled, equal-length numeric columns
// ---------------------------------------------------------------------------

/// A validated two-column table: the independent variable `x` and the
/// dependent variable `y`, each with the label taken from the header row.
///
/// Fields are private so a `Dataset` can only exist once its invariants hold:
/// both columns have the same length and every value is finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    x_label: String,
    y_label: String,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Dataset {
    /// Build a dataset from already-parsed columns.
    pub fn new(
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        x: Vec<f64>,
        y: Vec<f64>,
    ) -> Result<Self> {
        if x.len() != y.len() {
            return Err(AnalysisError::MismatchedLengths {
                x_len: x.len(),
                y_len: y.len(),
            });
        }

        let x_label = x_label.into();
        let y_label = y_label.into();
        for (label, column) in [(&x_label, &x), (&y_label, &y)] {
            if let Some((i, v)) = column.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(AnalysisError::NonNumericValue {
                    // header is line 1
                    line: i as u64 + 2,
                    column: label.clone(),
                    value: v.to_string(),
                });
            }
        }

        Ok(Dataset {
            x_label,
            y_label,
            x,
            y,
        })
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    /// Independent variable values, in file order.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Dependent variable values, in file order.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the table had a header but no data rows.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unequal_columns() {
        let err = Dataset::new("a", "b", vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MismatchedLengths { x_len: 2, y_len: 1 }
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = Dataset::new("a", "b", vec![1.0, 2.0], vec![1.0, f64::NAN]).unwrap_err();
        match err {
            AnalysisError::NonNumericValue { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "b");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_dataset_is_allowed() {
        let ds = Dataset::new("a", "b", vec![], vec![]).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.len(), 0);
    }
}
