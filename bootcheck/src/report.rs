//! Report Output
//!
//! JSON for machine consumption (plotting, archiving failed runs) and a
//! per-component table for terminals. Non-finite numbers serialize as `null`.

use crate::result::TestResult;
use std::fmt::Write;

/// Generate a prettified JSON report, replicates included.
pub fn generate_json_report(result: &TestResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Format a test result for human reading
pub fn format_human(result: &TestResult) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "bootstrap test {} ({} replicates, alpha = {}, corrected alpha = {}, correction = {})",
        if result.passed() { "PASSED" } else { "FAILED" },
        result.num_bootstrap_samples(),
        result.alpha,
        result.alpha_corrected,
        result.correction,
    );
    let _ = writeln!(
        out,
        "  {:>4}  {:>12}  {:>12}  {:>12}  {:>12}  {:>12}  {:>10}  {:>8}",
        "dim", "reference", "lower", "upper", "median", "iqr", "tol", "z"
    );
    for c in result.components() {
        let _ = writeln!(
            out,
            "{} {:>4}  {:>12.6}  {:>12.6}  {:>12.6}  {:>12.6}  {:>12.6}  {:>10.3e}  {:>8.3}",
            if c.passed { " " } else { "!" },
            c.index,
            c.reference,
            c.lower,
            c.upper,
            c.median,
            c.iqr,
            c.tol,
            c.z_score,
        );
    }
    for warning in &result.warnings {
        let _ = writeln!(out, "warning: {warning}");
    }

    out
}
