//! Calibration tests
//!
//! Run many independent tests with a correct reference and check that the
//! number of failures is consistent with `alpha` under an exact binomial test.

use bootcheck::statistics::{column_means, mean};
use bootcheck::{Correction, Statistic, TestConfig, bootstrap_test};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use statrs::distribution::{Binomial, Discrete};

const ALPHA: f64 = 0.3;
const NUM_RUNS: u64 = 200;
const SAMPLE_SIZE: usize = 100;

/// Two-sided exact binomial p-value: total probability of outcomes no more
/// likely than the observed one.
fn binomial_p_value(successes: u64, trials: u64, p: f64) -> f64 {
    let binomial = Binomial::new(p, trials).unwrap();
    let observed = binomial.pmf(successes) * (1.0 + 1e-7);
    let p_value: f64 = (0..=trials)
        .map(|k| binomial.pmf(k))
        .filter(|&pk| pk <= observed)
        .sum();
    p_value.min(1.0)
}

fn count_failures<T, S>(
    draw: impl Fn(&mut ChaCha8Rng) -> T,
    statistic: &S,
    correction: Correction,
) -> u64
where
    T: Clone + Send + Sync,
    S: Statistic<T>,
{
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut failures = 0;
    for run in 0..NUM_RUNS {
        let x: Vec<T> = (0..SAMPLE_SIZE).map(|_| draw(&mut rng)).collect();
        let config = TestConfig::default()
            .with_alpha(ALPHA)
            .with_correction(correction)
            .with_seed(run);
        match bootstrap_test(&x, statistic, 0.0, &config) {
            Ok(_) => {}
            Err(e) if e.is_test_failure() => failures += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    failures
}

fn scalar_draw(rng: &mut ChaCha8Rng) -> f64 {
    StandardNormal.sample(rng)
}

fn vector_draw(rng: &mut ChaCha8Rng) -> [f64; 5] {
    std::array::from_fn(|_| StandardNormal.sample(&mut *rng))
}

#[test]
fn test_binomial_p_value() {
    // Symmetric case: the mode has p-value 1
    assert!((binomial_p_value(50, 100, 0.5) - 1.0).abs() < 1e-9);
    assert!(binomial_p_value(90, 100, 0.5) < 1e-10);
}

#[test]
fn test_calibration_scalar() {
    let failures = count_failures(scalar_draw, &mean, Correction::Bonferroni);

    let p_value = binomial_p_value(failures, NUM_RUNS, ALPHA);
    assert!(
        p_value > 0.01,
        "expected {} failures but got {failures}; p-value = {p_value}",
        NUM_RUNS as f64 * ALPHA
    );
}

#[test]
fn test_calibration_vector_bonferroni() {
    let statistic = |x: &[[f64; 5]]| column_means(x);
    let failures = count_failures(vector_draw, &statistic, Correction::Bonferroni);

    let p_value = binomial_p_value(failures, NUM_RUNS, ALPHA);
    assert!(
        p_value > 0.01,
        "expected {} failures but got {failures}; p-value = {p_value}",
        NUM_RUNS as f64 * ALPHA
    );
}

#[test]
fn test_vector_without_correction_is_miscalibrated() {
    let statistic = |x: &[[f64; 5]]| column_means(x);
    let failures = count_failures(vector_draw, &statistic, Correction::None);

    let p_value = binomial_p_value(failures, NUM_RUNS, ALPHA);
    assert!(
        failures as f64 > NUM_RUNS as f64 * ALPHA && p_value < 0.01,
        "expected over-rejection without correction; {failures} failures, p-value = {p_value}"
    );
}
