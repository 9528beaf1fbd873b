//! Scan finalization: export, summary and the run report.

use anyhow::{Context, Result};

use crate::app::{print_final_summary, print_recommendations};
use crate::config::Config;
use crate::error_handling::ProcessingStats;
use crate::export::export_results;
use crate::mode::CheckMode;
use crate::models::DomainCheckResult;

use super::ScanReport;

/// Writes the results, logs the summary and builds the report.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn finalize_scan(
    config: &Config,
    results: Vec<DomainCheckResult>,
    mode: CheckMode,
    error_stats: &ProcessingStats,
    elapsed_seconds: f64,
    stopped: bool,
) -> Result<ScanReport> {
    let written = export_results(&results, config.output_format, config.output.as_deref())
        .context("Failed to write results")?;
    if let Some(path) = &config.output {
        log::info!("Wrote {written} results to {}", path.display());
    }

    let statistics = print_final_summary(&results, error_stats, elapsed_seconds, stopped);
    if config.show_recommendations {
        print_recommendations(&results);
    }

    Ok(ScanReport {
        mode,
        stopped,
        elapsed_seconds,
        statistics,
        results,
    })
}
