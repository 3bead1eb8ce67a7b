//! Percentile Computation
//!
//! Linear interpolation between order statistics: the q-quantile of n sorted
//! values sits at rank `q * (n - 1)`. This is the standard percentile
//! definition used for every bound the oracle reports.

use std::cmp::Ordering;

/// Compute a single percentile (0-100) from unsorted samples
///
/// # Examples
///
/// ```ignore
/// # use bootcheck_stats::compute_percentile;
/// let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&samples, 50.0), 3.0);
/// assert_eq!(compute_percentile(&samples, 25.0), 2.0);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    quantile_sorted(&sorted(samples), percentile / 100.0)
}

/// Quantile `q` in [0, 1] of already sorted values
///
/// Returns NaN for an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let rank = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lower_idx = (rank.floor() as usize).min(n - 1);
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    let (lo, hi) = (sorted[lower_idx], sorted[upper_idx]);
    // Equal neighbours interpolate to themselves (also for infinities)
    if lo == hi {
        return lo;
    }
    lo + fraction * (hi - lo)
}

/// Sorted copy; NaNs order last
pub fn sorted(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(total_order);
    sorted
}

/// Interquartile range (75th minus 25th percentile) of sorted values
pub fn iqr_sorted(sorted: &[f64]) -> f64 {
    quantile_sorted(sorted, 0.75) - quantile_sorted(sorted, 0.25)
}

fn total_order(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}
