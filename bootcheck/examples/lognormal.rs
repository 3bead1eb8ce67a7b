//! Checking an analytic expectation against simulated draws.
//!
//! The mean of a log-normal distribution with parameters `mu` and `sigma` is
//! `exp(mu + sigma^2 / 2)`. A common mistake is to drop the factor of one
//! half; the bootstrap test catches it.
//!
//! Run with `cargo run --example lognormal`.

use bootcheck::report::format_human;
use bootcheck::statistics::mean;
use bootcheck::{OnFail, TestConfig, bootstrap_test};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("bootcheck=info")
        .init();

    let (mu, sigma) = (-1.0f64, 1.0f64);
    let distribution = LogNormal::new(mu, sigma)?;
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let samples: Vec<f64> = (0..1000).map(|_| distribution.sample(&mut rng)).collect();

    let config = TestConfig::default().with_seed(7);

    let correct = (mu + sigma * sigma / 2.0).exp();
    let result = bootstrap_test(&samples, &mean, correct, &config)?;
    println!("exp(mu + sigma^2 / 2) = {correct:.6}");
    println!("{}", format_human(&result));

    let wrong = (mu + sigma * sigma).exp();
    match bootstrap_test(&samples, &mean, wrong, &config) {
        Ok(_) => println!("exp(mu + sigma^2) = {wrong:.6} unexpectedly passed"),
        Err(e) => {
            println!("exp(mu + sigma^2) = {wrong:.6} rejected: {e}");
            if let Some(result) = e.test_result() {
                println!("{}", format_human(result));
            }
        }
    }

    // The same failure as a warning
    let result = bootstrap_test(&samples, &mean, wrong, &config.with_on_fail(OnFail::Warn))?;
    println!("with on_fail = warn, the result is returned: passed = {}", result.passed());

    Ok(())
}
