//! Sample file parsing
//!
//! One observation per line. A line with a single number is a scalar
//! observation; several numbers separated by whitespace or commas form a
//! record. Blank lines and lines starting with `#` are skipped.

use anyhow::{Context, bail};
use std::path::Path;

/// Parsed observations
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    /// One number per line
    Scalars(Vec<f64>),
    /// Equal-length records
    Records(Vec<Vec<f64>>),
}

impl Samples {
    pub fn len(&self) -> usize {
        match self {
            Samples::Scalars(x) => x.len(),
            Samples::Records(x) => x.len(),
        }
    }
}

/// Read and parse a sample file
pub fn read_samples(path: &Path) -> anyhow::Result<Samples> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read sample file {}", path.display()))?;
    parse_samples(&content).with_context(|| format!("invalid sample file {}", path.display()))
}

pub fn parse_samples(content: &str) -> anyhow::Result<Samples> {
    let mut records: Vec<Vec<f64>> = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record = parse_numbers(line).with_context(|| format!("line {}", lineno + 1))?;
        if let Some(first) = records.first() {
            if first.len() != record.len() {
                bail!(
                    "line {}: expected {} columns, found {}",
                    lineno + 1,
                    first.len(),
                    record.len()
                );
            }
        }
        records.push(record);
    }

    if records.is_empty() {
        bail!("no observations");
    }
    if records[0].len() == 1 {
        Ok(Samples::Scalars(records.into_iter().map(|r| r[0]).collect()))
    } else {
        Ok(Samples::Records(records))
    }
}

/// Parse numbers separated by whitespace and/or commas
pub fn parse_numbers(s: &str) -> anyhow::Result<Vec<f64>> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .map(|field| {
            field
                .parse::<f64>()
                .with_context(|| format!("`{field}` is not a number"))
        })
        .collect()
}
