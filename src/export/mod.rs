//! Result export.
//!
//! Writes scan results as CSV, JSONL or a plain-text table to a file or
//! stdout.

mod csv;
mod jsonl;
mod output;
mod plain;

use anyhow::Result;
use std::path::Path;

use crate::config::OutputFormat;
use crate::models::DomainCheckResult;

pub use csv::write_csv;
pub use jsonl::write_jsonl;
pub use output::open_output;
pub use plain::write_plain;

/// Writes `results` in `format` to `path`, or stdout when `None`.
///
/// # Returns
///
/// The number of results written.
pub fn export_results(
    results: &[DomainCheckResult],
    format: OutputFormat,
    path: Option<&Path>,
) -> Result<usize> {
    let writer = open_output(path)?;
    match format {
        OutputFormat::Plain => write_plain(results, writer),
        OutputFormat::Csv => write_csv(results, writer),
        OutputFormat::Jsonl => write_jsonl(results, writer),
    }
}
