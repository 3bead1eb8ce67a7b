//! Error types for bootstrap tests.
//!
//! Every error propagates to the caller as-is; nothing is retried, since a
//! retry would only redraw randomness and could mask a wrong reference.

use crate::result::TestResult;
use bootcheck_logic::{InvalidConfigurationError, UnsupportedCorrectionError};
use bootcheck_stats::DimensionError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`bootstrap_test`](crate::bootstrap_test) and friends
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Statistic or reference shape is unsupported
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    /// Unknown multiple hypothesis correction
    #[error(transparent)]
    UnsupportedCorrection(#[from] UnsupportedCorrectionError),

    /// An option holds a value outside its domain
    #[error(transparent)]
    InvalidConfiguration(#[from] InvalidConfigurationError),

    /// The reference lies outside the tolerance-widened interval
    #[error(transparent)]
    TestFailed(Box<BootstrapTestError>),

    /// Configuration file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`TestConfig`](crate::TestConfig)
    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for bootstrap test operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<BootstrapTestError> for Error {
    fn from(e: BootstrapTestError) -> Self {
        Error::TestFailed(Box::new(e))
    }
}

impl Error {
    /// The failing result, if this is a test failure
    pub fn test_result(&self) -> Option<&TestResult> {
        match self {
            Error::TestFailed(e) => Some(&e.result),
            _ => None,
        }
    }

    /// Whether the error is a statistical failure rather than a misuse
    pub fn is_test_failure(&self) -> bool {
        matches!(self, Error::TestFailed(_))
    }
}

/// Reference value falls outside the bootstrapped confidence interval
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct BootstrapTestError {
    message: String,
    result: TestResult,
}

impl BootstrapTestError {
    /// Failure for `result`, with the message built from its interval
    pub fn new(result: TestResult) -> Self {
        let message = format!(
            "the reference value {} lies outside the 1 - (alpha = {}) interval [{}, {}]",
            result.format_values(&result.reference),
            result.alpha,
            result.format_values(&result.lower),
            result.format_values(&result.upper),
        );
        Self { message, result }
    }

    /// The full result of the failing test
    pub fn result(&self) -> &TestResult {
        &self.result
    }

    /// Human-readable description of the failure
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Take the result out of the error
    pub fn into_result(self) -> TestResult {
        self.result
    }
}
