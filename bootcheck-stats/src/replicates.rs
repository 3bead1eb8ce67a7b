//! Bootstrap Replicate Collection
//!
//! Stacks per-replicate statistic outputs into an R × k matrix and enforces
//! the shape invariants: every replicate has the same shape, and the stacked
//! collection has at most two dimensions (batch axis plus one statistic axis).

use crate::statistic::Value;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shape of a single statistic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// One value per replicate
    Scalar,
    /// `k` values per replicate
    Vector(usize),
}

impl Shape {
    /// Dimensionality of the stacked collection, batch axis included
    pub fn ndim(self) -> usize {
        match self {
            Shape::Scalar => 1,
            Shape::Vector(_) => 2,
        }
    }

    /// Number of simultaneously tested components
    pub fn dims(self) -> usize {
        match self {
            Shape::Scalar => 1,
            Shape::Vector(k) => k,
        }
    }
}

/// Statistic output shape is unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum DimensionError {
    /// The statistic returned a matrix or higher-dimensional array
    #[error(
        "only scalar and vector statistics are supported, not statistics with {dims} dimensions"
    )]
    TooManyDimensions { dims: usize },

    /// Replicates disagree on the output shape
    #[error("replicate {replicate} has shape {actual:?}, expected {expected:?}")]
    InconsistentShape {
        replicate: usize,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Vector reference length differs from the statistic length
    #[error("reference has {actual} components but the statistic has {expected}")]
    ReferenceMismatch { expected: usize, actual: usize },
}

/// Stacked statistic evaluations, one row per replicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replicates {
    shape: Shape,
    count: usize,
    data: Vec<f64>,
}

impl Replicates {
    /// Stack replicate outputs, verifying that they share one supported shape.
    pub fn stack(values: Vec<Value>) -> Result<Self, DimensionError> {
        let Some(first) = values.first() else {
            return Ok(Self {
                shape: Shape::Scalar,
                count: 0,
                data: Vec::new(),
            });
        };

        let expected = first.shape();
        if expected.len() > 1 {
            return Err(DimensionError::TooManyDimensions {
                dims: expected.len(),
            });
        }
        let shape = match expected.first() {
            None => Shape::Scalar,
            Some(&k) => Shape::Vector(k),
        };

        let count = values.len();
        let mut data = Vec::with_capacity(count * shape.dims());
        for (replicate, value) in values.into_iter().enumerate() {
            let actual = value.shape();
            if actual != expected {
                // A higher-dimensional output anywhere is a dimension error,
                // not a shape mismatch.
                if actual.len() > 1 {
                    return Err(DimensionError::TooManyDimensions { dims: actual.len() });
                }
                return Err(DimensionError::InconsistentShape {
                    replicate,
                    expected,
                    actual,
                });
            }
            data.extend_from_slice(value.as_slice());
        }

        Ok(Self { shape, count, data })
    }

    /// Build directly from a scalar column
    pub fn from_scalars(values: Vec<f64>) -> Self {
        Self {
            shape: Shape::Scalar,
            count: values.len(),
            data: values,
        }
    }

    /// Per-replicate output shape
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Dimensionality including the batch axis
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Number of replicates R
    pub fn len(&self) -> usize {
        self.count
    }

    /// No replicates
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Row-major backing storage
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Statistic output of replicate `i`
    pub fn row(&self, i: usize) -> &[f64] {
        let k = self.shape.dims();
        &self.data[i * k..(i + 1) * k]
    }

    /// Statistic outputs in replicate order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.shape.dims().max(1))
    }

    /// All replicate values of component `j`
    pub fn column(&self, j: usize) -> Vec<f64> {
        let k = self.shape.dims();
        self.data.iter().skip(j).step_by(k.max(1)).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_scalars() {
        let reps = Replicates::stack(vec![1.0.into(), 2.0.into(), 3.0.into()]).unwrap();
        assert_eq!(reps.shape(), Shape::Scalar);
        assert_eq!(reps.ndim(), 1);
        assert_eq!(reps.len(), 3);
        assert_eq!(reps.column(0), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_stack_vectors() {
        let reps = Replicates::stack(vec![
            vec![1.0, 10.0].into(),
            vec![2.0, 20.0].into(),
            vec![3.0, 30.0].into(),
        ])
        .unwrap();
        assert_eq!(reps.shape(), Shape::Vector(2));
        assert_eq!(reps.ndim(), 2);
        assert_eq!(reps.row(1), &[2.0, 20.0]);
        assert_eq!(reps.column(1), vec![10.0, 20.0, 30.0]);
        assert_eq!(reps.iter_rows().count(), 3);
    }

    #[test]
    fn test_matrix_output_rejected() {
        let matrix = Value::array(vec![3, 4], vec![0.0; 12]);
        let err = Replicates::stack(vec![matrix.clone(), matrix]).unwrap_err();
        assert_eq!(err, DimensionError::TooManyDimensions { dims: 2 });
        assert!(err.to_string().contains("2 dimensions"));
    }

    #[test]
    fn test_inconsistent_shape_rejected() {
        let err = Replicates::stack(vec![vec![1.0, 2.0].into(), vec![1.0].into()]).unwrap_err();
        assert!(matches!(
            err,
            DimensionError::InconsistentShape { replicate: 1, .. }
        ));

        let err = Replicates::stack(vec![1.0.into(), vec![1.0].into()]).unwrap_err();
        assert!(matches!(err, DimensionError::InconsistentShape { .. }));
    }

    #[test]
    fn test_empty_stack() {
        let reps = Replicates::stack(Vec::new()).unwrap();
        assert!(reps.is_empty());
        assert_eq!(reps.shape(), Shape::Scalar);
    }
}
