//! Tolerance Decision
//!
//! A reference passes when every component lies inside its interval widened
//! by `atol + rtol * |reference|`. The band only affects the decision; the
//! reported interval is left untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default relative tolerance
pub const DEFAULT_RTOL: f64 = 1e-7;

/// Default absolute tolerance
pub const DEFAULT_ATOL: f64 = 0.0;

/// Relative and absolute tolerance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Relative tolerance, scaled by `|reference|`
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: DEFAULT_RTOL,
            atol: DEFAULT_ATOL,
        }
    }
}

/// Outcome of the tolerance check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Tolerance band per component
    pub tol: Vec<f64>,
    /// Components whose reference lies outside the widened interval
    pub outside: Vec<usize>,
}

impl Decision {
    /// No component failed
    pub fn passed(&self) -> bool {
        self.outside.is_empty()
    }
}

impl Tolerance {
    /// Tolerance from its relative and absolute parts
    pub fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    /// `atol + rtol * |reference|` per component
    pub fn band(&self, reference: &[f64]) -> Vec<f64> {
        reference
            .iter()
            .map(|r| self.atol + self.rtol * r.abs())
            .collect()
    }

    /// Check every component against its tolerance-widened interval.
    ///
    /// The test fails if any component has `reference < lower - tol` or
    /// `reference > upper + tol`. NaN comparisons are false, so a NaN bound
    /// never fails a component on its own.
    pub fn check(&self, reference: &[f64], lower: &[f64], upper: &[f64]) -> Decision {
        let tol = self.band(reference);
        let outside = reference
            .iter()
            .zip(lower.iter().zip(upper))
            .zip(&tol)
            .enumerate()
            .filter(|(_, ((r, (lo, hi)), t))| **r < *lo - **t || **r > *hi + **t)
            .map(|(j, _)| j)
            .collect();

        Decision { tol, outside }
    }
}

/// How a failed check is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OnFail {
    /// Return an error carrying the result (default)
    #[default]
    Raise,
    /// Emit a warning and return the result normally
    Warn,
}

impl OnFail {
    /// Canonical name, as accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            OnFail::Raise => "raise",
            OnFail::Warn => "warn",
        }
    }

    /// Whether a failure under this policy is an error for the caller
    pub fn is_fatal(self) -> bool {
        matches!(self, OnFail::Raise)
    }
}

impl fmt::Display for OnFail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnFail {
    type Err = InvalidConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raise" => Ok(OnFail::Raise),
            "warn" => Ok(OnFail::Warn),
            _ => Err(InvalidConfigurationError::new("on_fail", s, "`raise` or `warn`")),
        }
    }
}

impl TryFrom<String> for OnFail {
    type Error = InvalidConfigurationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OnFail> for String {
    fn from(o: OnFail) -> Self {
        o.as_str().to_string()
    }
}

/// A configuration option holds a value it cannot take
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value `{value}` for `{option}`: expected {expected}")]
pub struct InvalidConfigurationError {
    /// Option name
    pub option: String,
    /// Offending value, as written
    pub value: String,
    /// Accepted values or range
    pub expected: String,
}

impl InvalidConfigurationError {
    /// Error for `option` holding `value`; `expected` describes the admissible values
    pub fn new(option: impl Into<String>, value: impl ToString, expected: impl Into<String>) -> Self {
        Self {
            option: option.into(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }
}
