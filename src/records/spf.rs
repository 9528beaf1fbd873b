//! SPF analysis.

use crate::dns::{find_spf_record, DnsLookup, RecordKind};
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::models::{SpfResult, Status};

/// Classifies an SPF record by its `all` mechanism.
///
/// `?all` and `+all` let anyone send; a record without `-all` or `~all`
/// has no terminal qualifier at all. All three are warnings.
pub fn analyze_spf_record(record: &str) -> Status {
    if record.contains("?all") || record.contains("+all") {
        Status::Warning
    } else if !record.contains("-all") && !record.contains("~all") {
        Status::Warning
    } else {
        Status::Ok
    }
}

/// Queries TXT at the apex of `domain` and classifies the first SPF record.
pub async fn check_spf(lookup: &dyn DnsLookup, domain: &str, stats: &ProcessingStats) -> SpfResult {
    let records = match lookup.lookup(domain, RecordKind::Txt).await {
        Ok(records) => records,
        Err(e) => {
            log::warn!("SPF check failed for {domain}: {e}");
            stats.increment_error(ErrorType::SpfLookupError);
            return SpfResult::failed(e.to_string());
        }
    };

    let Some(record) = find_spf_record(&records) else {
        log::debug!("No SPF record for {domain}");
        return SpfResult::missing();
    };

    SpfResult {
        status: analyze_spf_record(record),
        record: record.to_string(),
        error: None,
    }
}
