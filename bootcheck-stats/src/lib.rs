#![warn(missing_docs)]
//! Bootcheck Statistical Engine
//!
//! Provides the numerical half of the bootstrap oracle:
//! - Bootstrap resampling with independent per-replicate random streams
//! - Replicate collections with scalar/vector shape checks
//! - Percentiles via linear interpolation between order statistics
//! - Equal-tailed intervals, median, IQR and z-scores per component

mod interval;
mod percentiles;
mod replicates;
mod resample;
mod statistic;

pub use interval::{
    IntervalEstimate, estimate_interval, mean, population_std_dev, population_variance,
    tail_resolution_exceeded,
};
pub use percentiles::{compute_percentile, iqr_sorted, quantile_sorted, sorted};
pub use replicates::{DimensionError, Replicates, Shape};
pub use resample::{ResampleConfig, ResampleError, replicate_rng, resample, resample_indices};
pub use statistic::{Statistic, Value, WithArgs, with_args};

/// Default number of bootstrap replicates
pub const DEFAULT_NUM_BOOTSTRAP_SAMPLES: usize = 1_000;

/// Default significance level
pub const DEFAULT_ALPHA: f64 = 0.01;
