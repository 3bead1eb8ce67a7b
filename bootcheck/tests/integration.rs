//! Integration tests for bootcheck
//!
//! These tests verify the end-to-end behavior of the bootstrap oracle.

use bootcheck::statistics::{column_means, elementwise_mean, mean, variance};
use bootcheck::{
    Correction, DimensionError, Error, OnFail, Shape, TestConfig, Warning, bootstrap_test,
    bootstrap_test_with_rng, estimate_interval, with_args,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

fn normal_samples(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| StandardNormal.sample(&mut rng)).collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("bootcheck=debug")
        .with_test_writer()
        .try_init();
}

/// Test that a correct mean passes
#[test]
fn test_mean_success() {
    init_tracing();
    let x = normal_samples(100, 1);
    let result = bootstrap_test(&x, &mean, 0.0, &TestConfig::default().with_seed(1)).unwrap();

    assert!(result.passed());
    assert!(result.lower[0] <= 0.0 && 0.0 <= result.upper[0]);
}

/// Test that a wrong mean raises
#[test]
fn test_mean_fail() {
    let x = normal_samples(100, 2);
    let err = bootstrap_test(&x, &mean, 1.0, &TestConfig::default().with_seed(2)).unwrap_err();

    assert!(err.is_test_failure());
    let result = err.test_result().unwrap();
    assert!(!result.passed());
    assert_eq!(result.failed_dimensions, vec![0]);
    assert!(
        err.to_string()
            .starts_with("the reference value 1 lies outside the 1 - (alpha = 0.01) interval")
    );
}

/// Test population variance against its true value
#[test]
fn test_variance_success() {
    let x = normal_samples(1000, 3);
    let result = bootstrap_test(&x, &variance, 1.0, &TestConfig::default().with_seed(3)).unwrap();
    assert!(result.passed());
}

#[test]
fn test_variance_fail() {
    let x = normal_samples(1000, 4);
    let err = bootstrap_test(&x, &variance, 1.5, &TestConfig::default().with_seed(4)).unwrap_err();
    assert!(matches!(err, Error::TestFailed(_)));
}

/// Tolerances widen the interval monotonically
#[test]
fn test_tolerance() {
    let x = vec![2.9; 10];
    let config = TestConfig::default().with_seed(0);

    // Default rtol = 1e-7 is far below the 0.1 gap
    assert!(bootstrap_test(&x, &mean, 3.0, &config).is_err());
    assert!(bootstrap_test(&x, &mean, 3.0, &config.clone().with_rtol(0.0)).is_err());

    // Absolute tolerance
    let atol = |atol: f64| config.clone().with_rtol(0.0).with_atol(atol);
    assert!(bootstrap_test(&x, &mean, 3.0, &atol(0.099)).is_err());
    assert!(bootstrap_test(&x, &mean, 3.0, &atol(0.11)).is_ok());

    // Relative tolerance, scaled by |reference| = 3
    let rtol = |rtol: f64| config.clone().with_rtol(rtol);
    assert!(bootstrap_test(&x, &mean, 3.0, &rtol(0.033)).is_err());
    let result = bootstrap_test(&x, &mean, 3.0, &rtol(0.034)).unwrap();
    assert!((result.tol[0] - 0.102).abs() < 1e-12);
    // Reported interval is not widened
    assert!(result.upper[0] < 3.0);
}

/// Matrix-valued statistics are rejected regardless of the data
#[test]
fn test_invalid_dimensions() {
    let zeros = vec![vec![vec![0.0; 4]; 3]; 100];
    let noisy: Vec<Vec<Vec<f64>>> = normal_samples(1200, 5)
        .chunks(12)
        .map(|record| record.chunks(4).map(<[f64]>::to_vec).collect())
        .collect();

    let config = TestConfig::default().with_seed(5);
    for x in [zeros, noisy] {
        let statistic = elementwise_mean::<Vec<Vec<f64>>>;
        let err = bootstrap_test(&x, &statistic, 0.0, &config).unwrap_err();
        assert!(matches!(
            err,
            Error::Dimension(DimensionError::TooManyDimensions { dims: 2 })
        ));
    }
}

/// Unknown correction names never reach the pipeline
#[test]
fn test_unsupported_multiple_hypothesis_correction() {
    let err = "some-method".parse::<Correction>().unwrap_err();
    assert_eq!(err.name, "some-method");
    assert!(matches!(Error::from(err), Error::UnsupportedCorrection(_)));

    let err = TestConfig::from_toml(r#"multiple_hypothesis_correction = "some-method""#)
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedCorrection(ref e) if e.name == "some-method"));
}

/// Correction is ignored for scalar statistics
#[test]
fn test_scalar_ignores_correction() {
    let x = normal_samples(100, 6);
    for correction in [Correction::None, Correction::Bonferroni] {
        let config = TestConfig::default()
            .with_seed(6)
            .with_alpha(0.2)
            .with_correction(correction)
            .with_on_fail(OnFail::Warn);
        let result = bootstrap_test(&x, &mean, 0.0, &config).unwrap();
        assert_eq!(result.alpha_corrected, 0.2);
    }
}

/// Vector statistics are corrected and tested per component
#[test]
fn test_vector_statistic() {
    let flat = normal_samples(300, 7);
    let x: Vec<[f64; 3]> = flat.chunks(3).map(|c| [c[0], c[1] + 5.0, c[2] - 5.0]).collect();
    let statistic = |x: &[[f64; 3]]| column_means(x);
    let config = TestConfig::default().with_seed(7);

    let result = bootstrap_test(&x, &statistic, vec![0.0, 5.0, -5.0], &config).unwrap();
    assert_eq!(result.shape, Shape::Vector(3));
    assert!((result.alpha_corrected - 0.01 / 3.0).abs() < 1e-15);
    assert_eq!(result.lower.len(), 3);

    // One bad component fails the whole vector
    let err = bootstrap_test(&x, &statistic, vec![0.0, 5.0, 0.0], &config).unwrap_err();
    assert_eq!(err.test_result().unwrap().failed_dimensions, vec![2]);
}

/// Requesting tails finer than 1 / R warns regardless of the outcome
#[test]
fn test_small_sample_warning() {
    let x = normal_samples(10, 8);
    let config = TestConfig::default().with_seed(8).with_alpha(1e-9);

    let result = bootstrap_test(&x, &mean, 0.0, &config).unwrap();
    assert!(result.has_tail_warning());
    assert!(result.passed());

    let err = bootstrap_test(&x, &mean, 100.0, &config).unwrap_err();
    assert!(err.test_result().unwrap().has_tail_warning());

    let quiet = TestConfig::default()
        .with_seed(8)
        .with_alpha(0.01)
        .with_on_fail(OnFail::Warn);
    assert!(!bootstrap_test(&x, &mean, 0.0, &quiet).unwrap().has_tail_warning());
}

/// NaN replicates are reported rather than passing silently
#[test]
fn test_nan_replicates_warn() {
    let x: Vec<f64> = (0..20).map(f64::from).collect();
    let statistic = |x: &[f64]| if x.contains(&0.0) { f64::NAN } else { mean(x) };
    let config = TestConfig::default().with_seed(14).with_on_fail(OnFail::Warn);

    let result = bootstrap_test(&x, &statistic, 9.5, &config).unwrap();
    assert!(result.has_nan_warning());
    assert!(result.warnings.iter().any(|w| matches!(
        w,
        Warning::NanReplicates { count, num_bootstrap_samples: 1000 } if *count > 0
    )));

    let clean = bootstrap_test(&x, &mean, 9.5, &config).unwrap();
    assert!(!clean.has_nan_warning());
}

/// Warn-routed failures still return the result
#[test]
fn test_on_fail_warn() {
    init_tracing();
    let x = vec![2.9; 10];
    let config = TestConfig::default().with_seed(9).with_on_fail(OnFail::Warn);

    let result = bootstrap_test(&x, &mean, 3.0, &config).unwrap();
    assert!(!result.passed());
    assert!(result.upper[0] < 3.0);
    assert!(result.warnings.iter().any(|w| matches!(
        w,
        Warning::TestFailed { message } if message.starts_with("the reference value")
    )));
}

/// Unknown failure policies are configuration errors
#[test]
fn test_on_fail_invalid() {
    let err = "invalid".parse::<OnFail>().unwrap_err();
    assert_eq!(err.value, "invalid");

    let err = TestConfig::from_toml(r#"on_fail = "invalid""#).unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration(ref e) if e.value == "invalid"));
}

/// Stored replicates reproduce every derived field
#[test]
fn test_result_fields_rederive_from_replicates() {
    let x = normal_samples(200, 10);
    let config = TestConfig::default().with_seed(10).with_on_fail(OnFail::Warn);
    let result = bootstrap_test(&x, &mean, 0.05, &config).unwrap();

    let estimate = estimate_interval(&result.replicates, result.alpha_corrected);
    assert_eq!(estimate.lower, result.lower);
    assert_eq!(estimate.upper, result.upper);
    assert_eq!(estimate.median, result.median);
    assert_eq!(estimate.iqr, result.iqr);
    assert_eq!(estimate.z_scores(&result.reference), result.z_score);
}

/// Extra statistic arguments are bound up front
#[test]
fn test_statistic_with_arguments() {
    let x = normal_samples(500, 11);
    let trimmed_mean = with_args(
        |x: &[f64], fraction: &f64| {
            let mut sorted = x.to_vec();
            sorted.sort_by(|a, b| a.total_cmp(b));
            let cut = (sorted.len() as f64 * fraction) as usize;
            mean(&sorted[cut..sorted.len() - cut])
        },
        0.1,
    );

    let result = bootstrap_test(&x, &trimmed_mean, 0.0, &TestConfig::default().with_seed(11)).unwrap();
    assert!(result.passed());
}

/// Same injected entropy, same result
#[test]
fn test_injected_entropy_is_deterministic() {
    let x = normal_samples(50, 12);
    let config = TestConfig::default().with_on_fail(OnFail::Warn);

    let a = bootstrap_test_with_rng(&x, &mean, 0.0, &config, &mut ChaCha8Rng::seed_from_u64(12)).unwrap();
    let b = bootstrap_test_with_rng(&x, &mean, 0.0, &config, &mut ChaCha8Rng::seed_from_u64(12)).unwrap();
    let c = bootstrap_test_with_rng(&x, &mean, 0.0, &config, &mut ChaCha8Rng::seed_from_u64(13)).unwrap();

    assert_eq!(a, b);
    assert_ne!(a.replicates, c.replicates);
}
