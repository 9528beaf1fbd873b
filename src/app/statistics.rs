//! End-of-run summary printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::models::DomainCheckResult;
use crate::report::{recommendations, ScanStatistics};

/// Logs the batch statistics, the failure counters and a one-line summary.
pub fn print_final_summary(
    results: &[DomainCheckResult],
    error_stats: &ProcessingStats,
    elapsed_seconds: f64,
    stopped: bool,
) -> ScanStatistics {
    let stats = ScanStatistics::from_results(results);
    stats.log_summary();
    print_error_statistics(error_stats);
    info!(
        "{} {} domain{} in {:.1}s",
        if stopped { "Stopped after" } else { "Scanned" },
        stats.total,
        if stats.total == 1 { "" } else { "s" },
        elapsed_seconds
    );
    stats
}

/// Prints error and info counters to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

/// Logs the recommendations for every domain that has any.
///
/// Returns the number of recommendations printed.
pub fn print_recommendations(results: &[DomainCheckResult]) -> usize {
    let mut printed = 0;
    for result in results {
        let recs = recommendations(result);
        if recs.is_empty() {
            continue;
        }
        info!("{} (score {}):", result.domain, result.security_score);
        for rec in &recs {
            info!("   [{}] {}: {}", rec.priority, rec.protocol, rec.message);
        }
        printed += recs.len();
    }
    printed
}
