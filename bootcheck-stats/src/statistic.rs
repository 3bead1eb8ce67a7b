//! Statistic Capability
//!
//! A statistic maps one (re)sampled data set to a scalar, a vector, or, for
//! malformed statistics, a higher-dimensional array. Callers supply the
//! computation; the resampler only evaluates it.

use serde::{Deserialize, Serialize};

/// Output of a single statistic evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Scalar statistic (e.g. the mean of a univariate sample)
    Scalar(f64),
    /// Fixed-length vector statistic (e.g. column means of records)
    Vector(Vec<f64>),
    /// Row-major array with an explicit shape
    Array {
        /// Extent of each dimension
        shape: Vec<usize>,
        /// Flattened values, `shape.iter().product()` long
        data: Vec<f64>,
    },
}

impl Value {
    /// Build an array value, collapsing zero- and one-dimensional shapes.
    pub fn array(shape: Vec<usize>, data: Vec<f64>) -> Self {
        match shape.len() {
            0 => Value::Scalar(data.first().copied().unwrap_or(f64::NAN)),
            1 => Value::Vector(data),
            _ => Value::Array { shape, data },
        }
    }

    /// Shape of the value; empty for scalars.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Value::Scalar(_) => Vec::new(),
            Value::Vector(v) => vec![v.len()],
            Value::Array { shape, .. } => shape.clone(),
        }
    }

    /// Number of dimensions (0 for scalars)
    pub fn ndim(&self) -> usize {
        match self {
            Value::Scalar(_) => 0,
            Value::Vector(_) => 1,
            Value::Array { shape, .. } => shape.len(),
        }
    }

    /// Flattened view of the values
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Value::Scalar(x) => std::slice::from_ref(x),
            Value::Vector(v) => v,
            Value::Array { data, .. } => data,
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Scalar(x)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Vector(v)
    }
}

impl From<&[f64]> for Value {
    fn from(v: &[f64]) -> Self {
        Value::Vector(v.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(v: [f64; N]) -> Self {
        Value::Vector(v.to_vec())
    }
}

/// A pure computation evaluated on each bootstrap resample.
///
/// Implementations must be free of hidden shared mutable state: replicates may
/// be evaluated concurrently on the rayon pool.
pub trait Statistic<T>: Sync {
    /// Evaluate the statistic on one sample set
    fn evaluate(&self, sample: &[T]) -> Value;
}

impl<T, F, V> Statistic<T> for F
where
    F: Fn(&[T]) -> V + Sync,
    V: Into<Value>,
{
    fn evaluate(&self, sample: &[T]) -> Value {
        self(sample).into()
    }
}

/// A statistic with fixed extra arguments bound at construction.
#[derive(Debug, Clone)]
pub struct WithArgs<F, A> {
    func: F,
    args: A,
}

impl<F, A> WithArgs<F, A> {
    /// Bound arguments
    pub fn args(&self) -> &A {
        &self.args
    }
}

/// Bind `args` to a two-argument statistic.
///
/// ```ignore
/// # use bootcheck_stats::{with_args, Statistic};
/// let trimmed = with_args(|x: &[f64], cut: &usize| x[*cut..].iter().sum::<f64>(), 2);
/// assert_eq!(trimmed.evaluate(&[1.0, 2.0, 3.0]).as_slice(), &[3.0]);
/// ```
pub fn with_args<F, A>(func: F, args: A) -> WithArgs<F, A> {
    WithArgs { func, args }
}

impl<T, F, A, V> Statistic<T> for WithArgs<F, A>
where
    F: Fn(&[T], &A) -> V + Sync,
    A: Sync,
    V: Into<Value>,
{
    fn evaluate(&self, sample: &[T]) -> Value {
        (self.func)(sample, &self.args).into()
    }
}
