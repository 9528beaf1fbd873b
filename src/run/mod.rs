//! End-to-end scan run used by the CLI.

mod finalize;
mod init;

use anyhow::{Context, Result};
use std::time::Instant;

use crate::app::{progress_logger, read_domain_list, shutdown_gracefully, stop_on_ctrl_c};
use crate::config::Config;
use crate::mode::CheckMode;
use crate::models::DomainCheckResult;
use crate::report::ScanStatistics;

pub use init::{init_client, init_lookup};

use finalize::finalize_scan;

/// Outcome of a [`run_scan`] call.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Mode the batch ran in
    pub mode: CheckMode,
    /// Whether the scan was interrupted before the queue drained
    pub stopped: bool,
    pub elapsed_seconds: f64,
    pub statistics: ScanStatistics,
    /// One result per distinct input entry, in input order
    pub results: Vec<DomainCheckResult>,
}

/// Reads the configured domain list, scans it and writes the results.
///
/// Ctrl-C stops the scan; whatever completed is still written.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the batch is rejected
/// (no valid domains), or the output cannot be written.
///
/// # Example
///
/// ```no_run
/// use domain_auth_scan::{run_scan, Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     file: "domains.txt".into(),
///     delay_ms: 0,
///     ..Default::default()
/// };
/// let report = run_scan(config).await?;
/// println!("average score {:.1}", report.statistics.average_score);
/// # Ok(())
/// # }
/// ```
pub async fn run_scan(config: Config) -> Result<ScanReport> {
    let domains = read_domain_list(&config.file)?;
    log::info!("Read {} entries from {}", domains.len(), config.file.display());

    let lookup = init_lookup(&config);
    let (client, mode) = init_client(lookup, &config).await;

    let listener = stop_on_ctrl_c(client.clone());
    let start_time = Instant::now();
    let outcome = client
        .check_domains(&domains, Some(progress_logger(start_time)))
        .await;
    shutdown_gracefully(listener).await;
    let results = outcome.context("Scan failed")?;

    let stopped = client.scan_status().state.should_stop;
    finalize_scan(
        &config,
        results,
        mode,
        &client.stats(),
        start_time.elapsed().as_secs_f64(),
        stopped,
    )
}
