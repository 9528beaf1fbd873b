//! Progress logging utilities.

use log::info;
use std::sync::Arc;
use std::time::Instant;

use crate::config::LOGGING_INTERVAL;
use crate::models::Status;
use crate::scan::ProgressCallback;

/// Logs throughput so far.
///
/// # Arguments
///
/// * `start_time` - When the scan started
/// * `processed` - Domains finished so far
/// * `total` - Domains in the batch
pub fn log_progress(start_time: Instant, processed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        processed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {}/{} domains in {:.2} seconds (~{:.2} domains/sec)",
        processed, total, elapsed_secs, rate
    );
}

/// Progress callback that logs each result at debug level and throughput
/// every [`LOGGING_INTERVAL`] domains and at the end.
pub fn progress_logger(start_time: Instant) -> ProgressCallback {
    Arc::new(move |processed, total, result| {
        match &result.error {
            Some(error) => log::debug!("{}: {}", result.domain, error),
            None => log::debug!(
                "{}: score {} ({})",
                result.domain,
                result.security_score,
                describe(result.overall_status())
            ),
        }
        if processed % LOGGING_INTERVAL == 0 || processed == total {
            log_progress(start_time, processed, total);
        }
    })
}

fn describe(status: Status) -> &'static str {
    match status {
        Status::Ok => "all protocols ok",
        Status::Warning => "needs attention",
        Status::Error => "missing protection",
    }
}
