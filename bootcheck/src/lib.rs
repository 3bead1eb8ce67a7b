#![warn(missing_docs)]
//! # Bootcheck
//!
//! Statistical test oracle for values whose ground truth is itself random.
//!
//! Instead of asserting that a computed value equals a reference exactly,
//! bootcheck asserts that the reference is *plausible* given samples from the
//! process it describes:
//! - **Bootstrap resampling**: the caller's statistic is evaluated on R resamples
//! - **Equal-tailed intervals**: empirical `alpha / 2` and `1 - alpha / 2` quantiles
//! - **Vector statistics**: Bonferroni correction across components
//! - **Tolerances**: `atol + rtol * |reference|` widens the interval for the verdict
//! - **Failure routing**: return an error, or warn and return the result
//!
//! ## Quick Start
//!
//! ```ignore
//! use bootcheck::{TestConfig, bootstrap_test, statistics::mean};
//!
//! // Draws from a log-normal distribution with mu = -1, sigma = 1
//! let samples: Vec<f64> = draw_lognormal(-1.0, 1.0, 1000);
//! let expected = (-1.0f64 + 0.5).exp();
//!
//! let result = bootstrap_test(&samples, &mean, expected, &TestConfig::default())?;
//! println!("{result}");
//! ```
//!
//! ## Vector Statistics
//!
//! ```ignore
//! use bootcheck::{Correction, TestConfig, bootstrap_test, statistics::column_means};
//!
//! let config = TestConfig::default()
//!     .with_alpha(0.05)
//!     .with_correction(Correction::Bonferroni);
//! let statistic = |x: &[[f64; 3]]| column_means(x);
//! bootstrap_test(&records, &statistic, vec![0.0, 1.0, 2.0], &config)?;
//! ```

mod config;
mod error;
mod oracle;
pub mod report;
mod result;
pub mod statistics;

pub use config::{CONFIG_FILE_NAME, TestConfig};
pub use error::{BootstrapTestError, Error, Result};
pub use oracle::{BootstrapTest, bootstrap_test, bootstrap_test_with_rng};
pub use result::{ComponentSummary, TestResult, Warning};

// Re-export logic types
pub use bootcheck_logic::{
    Correction, Decision, InvalidConfigurationError, OnFail, Tolerance,
    UnsupportedCorrectionError,
};

// Re-export stats
pub use bootcheck_stats::{
    DimensionError, IntervalEstimate, Replicates, Shape, Statistic, Value, WithArgs,
    estimate_interval, with_args,
};
