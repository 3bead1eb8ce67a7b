//! Interval Estimation
//!
//! Turns a replicate collection into per-component summaries:
//! - Equal-tailed interval at the `alpha / 2` and `1 - alpha / 2` quantiles
//! - Median and interquartile range
//! - Mean and population standard deviation (for z-scores)

use crate::percentiles::{iqr_sorted, quantile_sorted, sorted};
use crate::replicates::Replicates;
use serde::{Deserialize, Serialize};

/// Per-component summary of the bootstrap distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalEstimate {
    /// Significance level the interval was built for
    pub alpha: f64,
    /// `alpha / 2` quantile per component
    pub lower: Vec<f64>,
    /// `1 - alpha / 2` quantile per component
    pub upper: Vec<f64>,
    /// 50th percentile per component
    pub median: Vec<f64>,
    /// 75th minus 25th percentile per component
    pub iqr: Vec<f64>,
    /// Replicate mean per component
    pub mean: Vec<f64>,
    /// Population (ddof = 0) standard deviation per component
    pub std_dev: Vec<f64>,
    /// Tail probability is finer than 1 / R, so the bounds are unreliable
    pub unreliable_tails: bool,
    /// Replicates with at least one NaN component
    pub nan_replicates: usize,
}

/// Estimate the equal-tailed `1 - alpha` interval of each component.
pub fn estimate_interval(replicates: &Replicates, alpha: f64) -> IntervalEstimate {
    let dims = replicates.shape().dims();

    let mut estimate = IntervalEstimate {
        alpha,
        lower: Vec::with_capacity(dims),
        upper: Vec::with_capacity(dims),
        median: Vec::with_capacity(dims),
        iqr: Vec::with_capacity(dims),
        mean: Vec::with_capacity(dims),
        std_dev: Vec::with_capacity(dims),
        unreliable_tails: tail_resolution_exceeded(alpha, replicates.len()),
        nan_replicates: replicates
            .iter_rows()
            .filter(|row| row.iter().any(|x| x.is_nan()))
            .count(),
    };

    for j in 0..dims {
        let column = replicates.column(j);
        let sorted = sorted(&column);

        estimate.lower.push(quantile_sorted(&sorted, alpha / 2.0));
        estimate.upper.push(quantile_sorted(&sorted, 1.0 - alpha / 2.0));
        estimate.median.push(quantile_sorted(&sorted, 0.5));
        estimate.iqr.push(iqr_sorted(&sorted));

        let column_mean = mean(&column);
        estimate.mean.push(column_mean);
        estimate.std_dev.push(population_std_dev(&column, column_mean));
    }

    estimate
}

impl IntervalEstimate {
    /// `(reference - mean) / std_dev` per component
    ///
    /// `reference` must already be broadcast to one value per component.
    /// Zero spread gives an infinite (or NaN) score.
    pub fn z_scores(&self, reference: &[f64]) -> Vec<f64> {
        reference
            .iter()
            .zip(self.mean.iter().zip(&self.std_dev))
            .map(|(r, (m, s))| (r - m) / s)
            .collect()
    }

    /// Number of components
    pub fn dims(&self) -> usize {
        self.lower.len()
    }
}

/// The requested tail probability is finer than the resampling resolution
pub fn tail_resolution_exceeded(alpha: f64, replicates: usize) -> bool {
    alpha < 1.0 / replicates as f64
}

/// Mean of samples (NaN when empty)
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population variance around a precomputed mean
pub fn population_variance(samples: &[f64], mean: f64) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64
}

/// Population standard deviation around a precomputed mean
pub fn population_std_dev(samples: &[f64], mean: f64) -> f64 {
    population_variance(samples, mean).sqrt()
}
