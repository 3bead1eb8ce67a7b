#![warn(missing_docs)]
//! Bootcheck Logic - Correction and Decision
//!
//! Everything between the bootstrap distribution and the verdict:
//! - Multiple hypothesis correction of the significance level
//! - Tolerance-widened accept/reject decisions per component
//! - Failure routing policy (raise or warn)

mod correction;
mod decision;

pub use correction::{Correction, UnsupportedCorrectionError};
pub use decision::{
    DEFAULT_ATOL, DEFAULT_RTOL, Decision, InvalidConfigurationError, OnFail, Tolerance,
};
