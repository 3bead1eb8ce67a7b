//! Test Result Record
//!
//! One record per test call, built after the decision. It carries everything
//! needed to diagnose a failure or plot the bootstrap distribution: the
//! interval, summaries, tolerance band and the replicates themselves.

use bootcheck_logic::Correction;
use bootcheck_stats::{Replicates, Shape};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-fatal condition observed during a test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Warning {
    /// The requested tail probability is finer than 1 / R
    TailResolution {
        /// Corrected significance level
        alpha_corrected: f64,
        /// Number of replicates R
        num_bootstrap_samples: usize,
    },
    /// Some replicates produced NaN; the bounds may be NaN or built from
    /// the remaining values
    NanReplicates {
        /// Replicates with at least one NaN component
        count: usize,
        /// Number of replicates R
        num_bootstrap_samples: usize,
    },
    /// The test failed and was routed to a warning
    TestFailed {
        /// Failure message, as carried by the error under `raise`
        message: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::TailResolution {
                alpha_corrected,
                num_bootstrap_samples,
            } => write!(
                f,
                "cannot estimate tail probabilities smaller than `1 / (num_bootstrap_samples = \
                 {num_bootstrap_samples})`; corrected alpha is {alpha_corrected}"
            ),
            Warning::NanReplicates {
                count,
                num_bootstrap_samples,
            } => write!(
                f,
                "the statistic returned NaN for {count} of {num_bootstrap_samples} bootstrap replicates"
            ),
            Warning::TestFailed { message } => f.write_str(message),
        }
    }
}

/// Result of a bootstrap test
///
/// Per-component fields hold one entry for scalar statistics and `k` entries
/// for vector statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Nominal significance level
    pub alpha: f64,
    /// Significance level after multiple hypothesis correction
    pub alpha_corrected: f64,
    /// Correction policy that was in effect
    pub correction: Correction,
    /// Shape of one statistic output
    pub shape: Shape,
    /// Reference value per component
    pub reference: Vec<f64>,
    /// `alpha_corrected / 2` quantile per component
    pub lower: Vec<f64>,
    /// `1 - alpha_corrected / 2` quantile per component
    pub upper: Vec<f64>,
    /// `(reference - mean) / std` of the replicates per component
    pub z_score: Vec<f64>,
    /// Median of the replicates per component
    pub median: Vec<f64>,
    /// Interquartile range of the replicates per component
    pub iqr: Vec<f64>,
    /// Tolerance band `atol + rtol * |reference|` per component
    pub tol: Vec<f64>,
    /// Components outside their tolerance-widened interval
    pub failed_dimensions: Vec<usize>,
    /// The bootstrap distribution
    pub replicates: Replicates,
    /// Warnings emitted while testing
    pub warnings: Vec<Warning>,
}

/// One component of a [`TestResult`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(missing_docs)]
pub struct ComponentSummary {
    /// Position in the statistic output
    pub index: usize,
    pub reference: f64,
    pub lower: f64,
    pub upper: f64,
    pub z_score: f64,
    pub median: f64,
    pub iqr: f64,
    pub tol: f64,
    /// Reference within `[lower - tol, upper + tol]`
    pub passed: bool,
}

impl TestResult {
    /// No component fell outside its interval
    pub fn passed(&self) -> bool {
        self.failed_dimensions.is_empty()
    }

    /// Number of replicates R
    pub fn num_bootstrap_samples(&self) -> usize {
        self.replicates.len()
    }

    /// The statistic returned a single value
    pub fn is_scalar(&self) -> bool {
        self.shape == Shape::Scalar
    }

    /// Number of tested components
    pub fn dims(&self) -> usize {
        self.reference.len()
    }

    /// Whether any warning of the tail-resolution kind was emitted
    pub fn has_tail_warning(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, Warning::TailResolution { .. }))
    }

    /// Whether the statistic returned NaN for any replicate
    pub fn has_nan_warning(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, Warning::NanReplicates { .. }))
    }

    /// Per-component view of the interval, summaries and verdict
    pub fn components(&self) -> impl Iterator<Item = ComponentSummary> + '_ {
        (0..self.dims()).map(|j| ComponentSummary {
            index: j,
            reference: self.reference[j],
            lower: self.lower[j],
            upper: self.upper[j],
            z_score: self.z_score[j],
            median: self.median[j],
            iqr: self.iqr[j],
            tol: self.tol[j],
            passed: !self.failed_dimensions.contains(&j),
        })
    }

    /// Render per-component values the way the statistic returned them:
    /// a bare number for scalars, a bracketed list for vectors.
    pub fn format_values(&self, values: &[f64]) -> String {
        match (self.shape, values) {
            (Shape::Scalar, [x]) => x.to_string(),
            _ => {
                let items: Vec<String> = values.iter().map(|x| x.to_string()).collect();
                format!("[{}]", items.join(", "))
            }
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: reference {} vs 1 - (alpha = {}) interval [{}, {}] from {} replicates",
            if self.passed() { "passed" } else { "FAILED" },
            self.format_values(&self.reference),
            self.alpha,
            self.format_values(&self.lower),
            self.format_values(&self.upper),
            self.num_bootstrap_samples(),
        )
    }
}
