//! Built-in Statistics
//!
//! Common statistics to pass to [`bootstrap_test`](crate::bootstrap_test).
//! Any `Fn(&[T]) -> impl Into<Value>` works as well; these cover the usual
//! univariate and column-wise cases.

use bootcheck_stats::{Value, compute_percentile};

/// Arithmetic mean
pub fn mean(sample: &[f64]) -> f64 {
    bootcheck_stats::mean(sample)
}

/// Population variance (divides by n)
pub fn variance(sample: &[f64]) -> f64 {
    bootcheck_stats::population_variance(sample, mean(sample))
}

/// Median via linear interpolation
pub fn median(sample: &[f64]) -> f64 {
    compute_percentile(sample, 50.0)
}

/// Mean of each column of fixed-length records
///
/// Records shorter than the first one contribute NaN to the missing columns.
pub fn column_means<R: AsRef<[f64]>>(sample: &[R]) -> Vec<f64> {
    let cols = sample.first().map_or(0, |r| r.as_ref().len());
    let mut sums = vec![0.0; cols];
    for record in sample {
        let record = record.as_ref();
        for (j, sum) in sums.iter_mut().enumerate() {
            *sum += record.get(j).copied().unwrap_or(f64::NAN);
        }
    }
    let n = sample.len() as f64;
    sums.into_iter().map(|s| s / n).collect()
}

/// Population variance of each column of fixed-length records
pub fn column_variances<R: AsRef<[f64]>>(sample: &[R]) -> Vec<f64> {
    let means = column_means(sample);
    let mut sums = vec![0.0; means.len()];
    for record in sample {
        let record = record.as_ref();
        for (j, sum) in sums.iter_mut().enumerate() {
            let x = record.get(j).copied().unwrap_or(f64::NAN);
            *sum += (x - means[j]).powi(2);
        }
    }
    let n = sample.len() as f64;
    sums.into_iter().map(|s| s / n).collect()
}

/// Median of each column of fixed-length records
pub fn column_medians<R: AsRef<[f64]>>(sample: &[R]) -> Vec<f64> {
    let cols = sample.first().map_or(0, |r| r.as_ref().len());
    (0..cols)
        .map(|j| {
            let column: Vec<f64> = sample
                .iter()
                .map(|r| r.as_ref().get(j).copied().unwrap_or(f64::NAN))
                .collect();
            compute_percentile(&column, 50.0)
        })
        .collect()
}

/// Element-wise mean of matrix-shaped records, returned as a 2-D array.
///
/// Two-dimensional outputs are not testable; this exists for callers whose
/// records are matrices and who reduce further before testing.
pub fn elementwise_mean<M: AsRef<[Vec<f64>]>>(sample: &[M]) -> Value {
    let (rows, cols) = sample.first().map_or((0, 0), |m| {
        let m = m.as_ref();
        (m.len(), m.first().map_or(0, Vec::len))
    });
    let mut data = vec![0.0; rows * cols];
    for record in sample {
        for (i, row) in record.as_ref().iter().enumerate().take(rows) {
            for (j, x) in row.iter().enumerate().take(cols) {
                data[i * cols + j] += x;
            }
        }
    }
    let n = sample.len() as f64;
    data.iter_mut().for_each(|x| *x /= n);
    Value::array(vec![rows, cols], data)
}
