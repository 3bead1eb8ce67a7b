//! Multiple Hypothesis Correction
//!
//! A vector statistic tests k hypotheses at once. Without correction the
//! probability that at least one component rejects grows with k, so the
//! significance level is adjusted before the interval is built.

use bootcheck_stats::Shape;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Correction policy for vector-valued statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Correction {
    /// Test every component at the nominal level
    None,
    /// Divide the level by the number of components (default)
    #[default]
    Bonferroni,
}

/// Correction policy name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("multiple hypothesis correction `{name}` is not supported")]
pub struct UnsupportedCorrectionError {
    /// The unrecognised name
    pub name: String,
}

impl Correction {
    /// Corrected significance level for a statistic of the given shape.
    ///
    /// Scalar statistics test a single hypothesis and are never corrected.
    pub fn apply(self, alpha: f64, shape: Shape) -> f64 {
        match (self, shape) {
            (_, Shape::Scalar) => alpha,
            (Correction::None, Shape::Vector(_)) => alpha,
            (Correction::Bonferroni, Shape::Vector(k)) => alpha / k.max(1) as f64,
        }
    }

    /// Canonical name, as accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            Correction::None => "none",
            Correction::Bonferroni => "bonferroni",
        }
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Correction {
    type Err = UnsupportedCorrectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "false" | "off" => Ok(Correction::None),
            "bonferroni" => Ok(Correction::Bonferroni),
            _ => Err(UnsupportedCorrectionError {
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Correction {
    type Error = UnsupportedCorrectionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Correction> for String {
    fn from(c: Correction) -> Self {
        c.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_is_never_corrected() {
        assert_eq!(Correction::Bonferroni.apply(0.3, Shape::Scalar), 0.3);
        assert_eq!(Correction::None.apply(0.3, Shape::Scalar), 0.3);
    }

    #[test]
    fn test_bonferroni_divides_by_components() {
        let corrected = Correction::Bonferroni.apply(0.3, Shape::Vector(5));
        assert!((corrected - 0.06).abs() < 1e-15);
        assert_eq!(Correction::None.apply(0.3, Shape::Vector(5)), 0.3);
    }

    #[test]
    fn test_parse() {
        assert_eq!("bonferroni".parse::<Correction>(), Ok(Correction::Bonferroni));
        assert_eq!("Bonferroni".parse::<Correction>(), Ok(Correction::Bonferroni));
        assert_eq!("none".parse::<Correction>(), Ok(Correction::None));
        assert_eq!("false".parse::<Correction>(), Ok(Correction::None));
    }

    #[test]
    fn test_unsupported_name() {
        let err = "some-method".parse::<Correction>().unwrap_err();
        assert_eq!(err.name, "some-method");
        assert!(err.to_string().contains("`some-method`"));
    }

    #[test]
    fn test_serde_uses_names() {
        #[derive(Debug, Deserialize)]
        struct Wrapper {
            correction: Correction,
        }

        let w: Wrapper = toml::from_str(r#"correction = "none""#).unwrap();
        assert_eq!(w.correction, Correction::None);

        let err = toml::from_str::<Wrapper>(r#"correction = "holm""#).unwrap_err();
        assert!(err.to_string().contains("`holm` is not supported"));
    }
}
