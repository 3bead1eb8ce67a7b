//! Bootstrap Test Pipeline
//!
//! resample -> correct alpha -> estimate interval -> decide -> record.
//! Each call is self-contained; the only shared input is the entropy source.

use crate::config::TestConfig;
use crate::error::{BootstrapTestError, Result};
use crate::result::{TestResult, Warning};
use bootcheck_logic::{InvalidConfigurationError, OnFail};
use bootcheck_stats::{
    DimensionError, ResampleError, Shape, Statistic, Value, estimate_interval, resample,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

/// Check that `reference` is plausible under the bootstrap distribution of
/// `statistic` evaluated on `samples`.
///
/// Entropy comes from `config.seed` when set and from the thread-local
/// generator otherwise.
///
/// # Errors
/// - [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) for
///   out-of-range options or an empty sample set
/// - [`Error::Dimension`](crate::Error::Dimension) when the statistic returns
///   a matrix, changes shape between replicates, or disagrees with the
///   reference
/// - [`Error::TestFailed`](crate::Error::TestFailed) when the reference lies
///   outside the interval and `on_fail` is `raise`
pub fn bootstrap_test<T, S>(
    samples: &[T],
    statistic: &S,
    reference: impl Into<Value>,
    config: &TestConfig,
) -> Result<TestResult>
where
    T: Clone + Send + Sync,
    S: Statistic<T> + ?Sized,
{
    match config.seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            bootstrap_test_with_rng(samples, statistic, reference, config, &mut rng)
        }
        None => {
            bootstrap_test_with_rng(samples, statistic, reference, config, &mut rand::thread_rng())
        }
    }
}

/// [`bootstrap_test`] with a caller-supplied entropy source.
///
/// One `u64` is drawn from `rng` to seed the per-replicate streams;
/// `config.seed` is ignored.
pub fn bootstrap_test_with_rng<T, S, R>(
    samples: &[T],
    statistic: &S,
    reference: impl Into<Value>,
    config: &TestConfig,
    rng: &mut R,
) -> Result<TestResult>
where
    T: Clone + Send + Sync,
    S: Statistic<T> + ?Sized,
    R: Rng + ?Sized,
{
    config.validate()?;
    let reference = reference.into();

    let seed: u64 = rng.r#gen();
    debug!(
        samples = samples.len(),
        replicates = config.num_bootstrap_samples,
        parallel = config.parallel,
        "drawing bootstrap replicates"
    );
    let replicates =
        resample(samples, statistic, &config.resample_config(), seed).map_err(|e| match e {
            ResampleError::EmptySample => {
                InvalidConfigurationError::new("samples", "[]", "at least one observation").into()
            }
            ResampleError::Dimension(e) => crate::Error::from(e),
        })?;

    let shape = replicates.shape();
    let reference = broadcast_reference(&reference, shape)?;

    let alpha_corrected = config
        .multiple_hypothesis_correction
        .apply(config.alpha, shape);
    debug!(
        alpha = config.alpha,
        alpha_corrected,
        correction = %config.multiple_hypothesis_correction,
        dims = shape.dims(),
        "computing bootstrap interval"
    );

    let estimate = estimate_interval(&replicates, alpha_corrected);
    let mut warnings = Vec::new();
    if estimate.unreliable_tails {
        let warning = Warning::TailResolution {
            alpha_corrected,
            num_bootstrap_samples: replicates.len(),
        };
        warn!("{warning}");
        warnings.push(warning);
    }
    if estimate.nan_replicates > 0 {
        let warning = Warning::NanReplicates {
            count: estimate.nan_replicates,
            num_bootstrap_samples: replicates.len(),
        };
        warn!("{warning}");
        warnings.push(warning);
    }

    let decision = config
        .tolerance()
        .check(&reference, &estimate.lower, &estimate.upper);
    let z_score = estimate.z_scores(&reference);

    let result = TestResult {
        alpha: config.alpha,
        alpha_corrected,
        correction: config.multiple_hypothesis_correction,
        shape,
        reference,
        lower: estimate.lower,
        upper: estimate.upper,
        z_score,
        median: estimate.median,
        iqr: estimate.iqr,
        tol: decision.tol,
        failed_dimensions: decision.outside,
        replicates,
        warnings,
    };

    if result.passed() {
        debug!("{result}");
        return Ok(result);
    }

    let error = BootstrapTestError::new(result);
    match config.on_fail {
        OnFail::Raise => Err(error.into()),
        OnFail::Warn => {
            let message = error.message().to_string();
            warn!("{message}");
            let mut result = error.into_result();
            result.warnings.push(Warning::TestFailed { message });
            Ok(result)
        }
    }
}

/// Owned configuration with the same entry points, for repeated tests
#[derive(Debug, Clone, Default)]
pub struct BootstrapTest {
    config: TestConfig,
}

impl BootstrapTest {
    /// Validate `config` up front
    pub fn new(config: TestConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Validated configuration
    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    /// [`bootstrap_test`] with this configuration
    pub fn run<T, S>(&self, samples: &[T], statistic: &S, reference: impl Into<Value>) -> Result<TestResult>
    where
        T: Clone + Send + Sync,
        S: Statistic<T> + ?Sized,
    {
        bootstrap_test(samples, statistic, reference, &self.config)
    }

    /// [`bootstrap_test_with_rng`] with this configuration
    pub fn run_with_rng<T, S, R>(
        &self,
        samples: &[T],
        statistic: &S,
        reference: impl Into<Value>,
        rng: &mut R,
    ) -> Result<TestResult>
    where
        T: Clone + Send + Sync,
        S: Statistic<T> + ?Sized,
        R: Rng + ?Sized,
    {
        bootstrap_test_with_rng(samples, statistic, reference, &self.config, rng)
    }
}

/// Expand the reference to one value per statistic component.
///
/// A scalar reference applies to every component; a vector reference must
/// match the statistic's length.
fn broadcast_reference(reference: &Value, shape: Shape) -> Result<Vec<f64>, DimensionError> {
    let dims = shape.dims();
    match reference {
        Value::Scalar(r) => Ok(vec![*r; dims]),
        Value::Vector(v) if v.len() == dims => Ok(v.clone()),
        Value::Vector(v) => Err(DimensionError::ReferenceMismatch {
            expected: dims,
            actual: v.len(),
        }),
        Value::Array { shape, .. } => Err(DimensionError::TooManyDimensions { dims: shape.len() }),
    }
}
