//! Configuration loading from bootcheck.toml
//!
//! A test configuration can be built in code with the `with_*` setters or read
//! from a `bootcheck.toml` file, discovered by walking up from the current
//! directory. Policy names are parsed when the configuration is built, so an
//! unknown correction or failure policy is reported before any resampling.

use crate::error::{Error, Result};
use bootcheck_logic::{Correction, InvalidConfigurationError, OnFail, Tolerance};
use bootcheck_stats::ResampleConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file searched for by [`TestConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "bootcheck.toml";

/// Bootstrap test configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct TestConfig {
    /// Number of bootstrap replicates R
    pub num_bootstrap_samples: usize,
    /// Nominal significance level, in (0, 1)
    pub alpha: f64,
    /// Correction policy for vector statistics
    pub multiple_hypothesis_correction: Correction,
    /// Relative tolerance
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
    /// What to do when the reference lies outside the interval
    pub on_fail: OnFail,
    /// Evaluate replicates on the rayon pool
    pub parallel: bool,
    /// Seed for reproducible resampling; fresh entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Configuration as written in the file.
///
/// Policy names stay strings here so that converting them reports
/// [`Error::UnsupportedCorrection`] and [`Error::InvalidConfiguration`]
/// instead of a generic TOML error.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_num_bootstrap_samples")]
    num_bootstrap_samples: usize,
    #[serde(default = "default_alpha")]
    alpha: f64,
    #[serde(default)]
    multiple_hypothesis_correction: Option<String>,
    #[serde(default = "default_rtol")]
    rtol: f64,
    #[serde(default)]
    atol: f64,
    #[serde(default)]
    on_fail: Option<String>,
    #[serde(default = "default_parallel")]
    parallel: bool,
    #[serde(default)]
    seed: Option<u64>,
}

impl TryFrom<RawConfig> for TestConfig {
    type Error = Error;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let multiple_hypothesis_correction = match raw.multiple_hypothesis_correction {
            Some(name) => name.parse::<Correction>()?,
            None => Correction::default(),
        };
        let on_fail = match raw.on_fail {
            Some(policy) => policy.parse::<OnFail>()?,
            None => OnFail::default(),
        };

        let config = Self {
            num_bootstrap_samples: raw.num_bootstrap_samples,
            alpha: raw.alpha,
            multiple_hypothesis_correction,
            rtol: raw.rtol,
            atol: raw.atol,
            on_fail,
            parallel: raw.parallel,
            seed: raw.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            num_bootstrap_samples: default_num_bootstrap_samples(),
            alpha: default_alpha(),
            multiple_hypothesis_correction: Correction::default(),
            rtol: default_rtol(),
            atol: bootcheck_logic::DEFAULT_ATOL,
            on_fail: OnFail::default(),
            parallel: default_parallel(),
            seed: None,
        }
    }
}

fn default_num_bootstrap_samples() -> usize {
    bootcheck_stats::DEFAULT_NUM_BOOTSTRAP_SAMPLES
}
fn default_alpha() -> f64 {
    bootcheck_stats::DEFAULT_ALPHA
}
fn default_rtol() -> f64 {
    bootcheck_logic::DEFAULT_RTOL
}
fn default_parallel() -> bool {
    true
}

impl TestConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)?;
        Self::try_from(raw)
    }

    /// Discover and load `bootcheck.toml` by walking up from the current directory.
    ///
    /// `Ok(None)` means no file was found. A file that is found but does not
    /// load is an error.
    pub fn discover() -> Result<Option<Self>> {
        let dir = std::env::current_dir().map_err(|source| Error::Io {
            path: PathBuf::from("."),
            source,
        })?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` and load the first `bootcheck.toml` found
    pub fn discover_from(start: &Path) -> Result<Option<Self>> {
        for dir in start.ancestors() {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Self::load(&config_path).map(Some);
            }
        }
        Ok(None)
    }

    /// Check every option against its admissible range.
    pub fn validate(&self) -> Result<(), InvalidConfigurationError> {
        if self.num_bootstrap_samples == 0 {
            return Err(InvalidConfigurationError::new(
                "num_bootstrap_samples",
                self.num_bootstrap_samples,
                "a positive integer",
            ));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(InvalidConfigurationError::new(
                "alpha",
                self.alpha,
                "a value in (0, 1)",
            ));
        }
        for (option, value) in [("rtol", self.rtol), ("atol", self.atol)] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(InvalidConfigurationError::new(
                    option,
                    value,
                    "a finite non-negative number",
                ));
            }
        }
        Ok(())
    }

    /// Set the number of bootstrap replicates
    pub fn with_num_bootstrap_samples(mut self, num_bootstrap_samples: usize) -> Self {
        self.num_bootstrap_samples = num_bootstrap_samples;
        self
    }

    /// Set the nominal significance level
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the multiple hypothesis correction
    pub fn with_correction(mut self, correction: Correction) -> Self {
        self.multiple_hypothesis_correction = correction;
        self
    }

    /// Set the relative tolerance
    pub fn with_rtol(mut self, rtol: f64) -> Self {
        self.rtol = rtol;
        self
    }

    /// Set the absolute tolerance
    pub fn with_atol(mut self, atol: f64) -> Self {
        self.atol = atol;
        self
    }

    /// Set the failure policy
    pub fn with_on_fail(mut self, on_fail: OnFail) -> Self {
        self.on_fail = on_fail;
        self
    }

    /// Evaluate replicates on the rayon pool or serially
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Fix the resampling seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resampler settings derived from this configuration
    pub fn resample_config(&self) -> ResampleConfig {
        ResampleConfig {
            replicates: self.num_bootstrap_samples,
            parallel: self.parallel,
        }
    }

    /// Tolerance band settings
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.rtol, self.atol)
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Bootcheck Configuration

# Number of bootstrap replicates
num_bootstrap_samples = 1000
# Significance level: roughly the probability that a correct reference fails
alpha = 0.01
# Correction for vector statistics: "bonferroni" or "none"
multiple_hypothesis_correction = "bonferroni"
# Tolerance added to both interval bounds: atol + rtol * |reference|
rtol = 1e-7
atol = 0.0
# On failure: "raise" returns an error, "warn" logs and returns the result
on_fail = "raise"
# Evaluate replicates in parallel
parallel = true
# Seed for reproducible resampling (uncomment to enable)
# seed = 42
"#
        .to_string()
    }
}
