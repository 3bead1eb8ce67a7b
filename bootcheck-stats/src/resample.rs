//! Bootstrap Resampling
//!
//! Draws resamples with replacement and evaluates a statistic on each.
//!
//! Every replicate gets its own ChaCha8 stream derived from one base seed, so
//! replicate `i` sees the same indices whether the collection is built on the
//! rayon pool or serially.

use crate::DEFAULT_NUM_BOOTSTRAP_SAMPLES;
use crate::replicates::{DimensionError, Replicates};
use crate::statistic::{Statistic, Value};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use thiserror::Error;

/// Resampling configuration
#[derive(Debug, Clone)]
pub struct ResampleConfig {
    /// Number of bootstrap replicates R (default: 1,000)
    pub replicates: usize,
    /// Whether to evaluate replicates on the rayon pool
    pub parallel: bool,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            replicates: DEFAULT_NUM_BOOTSTRAP_SAMPLES,
            parallel: true,
        }
    }
}

/// Errors that can occur during resampling
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResampleError {
    /// No observations to draw from
    #[error("cannot resample an empty sample set")]
    EmptySample,

    /// Statistic output shape is unusable
    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

/// Draw `config.replicates` bootstrap replicates of `statistic` on `samples`.
///
/// `seed` is the base seed of the per-replicate streams; draw it from the
/// caller's entropy source.
pub fn resample<T, S>(
    samples: &[T],
    statistic: &S,
    config: &ResampleConfig,
    seed: u64,
) -> Result<Replicates, ResampleError>
where
    T: Clone + Send + Sync,
    S: Statistic<T> + ?Sized,
{
    if samples.is_empty() {
        return Err(ResampleError::EmptySample);
    }

    let values: Vec<Value> = if config.parallel {
        (0..config.replicates)
            .into_par_iter()
            .map(|i| evaluate_replicate(samples, statistic, seed, i))
            .collect()
    } else {
        (0..config.replicates)
            .map(|i| evaluate_replicate(samples, statistic, seed, i))
            .collect()
    };

    Ok(Replicates::stack(values)?)
}

/// Generator for replicate `index`: the base seed on its own stream
pub fn replicate_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}

/// Indices of one resample: `n` uniform draws from `[0, n)` with replacement
pub fn resample_indices<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<usize> {
    (0..n).map(|_| rng.gen_range(0..n)).collect()
}

fn evaluate_replicate<T, S>(samples: &[T], statistic: &S, seed: u64, index: usize) -> Value
where
    T: Clone,
    S: Statistic<T> + ?Sized,
{
    let mut rng = replicate_rng(seed, index);
    let resample: Vec<T> = resample_indices(&mut rng, samples.len())
        .into_iter()
        .map(|i| samples[i].clone())
        .collect();
    statistic.evaluate(&resample)
}
