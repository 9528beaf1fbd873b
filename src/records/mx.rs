//! MX lookup.

use crate::dns::{DnsLookup, RecordKind};
use crate::error_handling::{ErrorType, ProcessingStats};

/// Returns the mail exchangers of `domain` as reported by the lookup port.
/// A failed lookup yields an empty list.
pub async fn check_mx(lookup: &dyn DnsLookup, domain: &str, stats: &ProcessingStats) -> Vec<String> {
    match lookup.lookup(domain, RecordKind::Mx).await {
        Ok(hosts) => hosts,
        Err(e) => {
            log::warn!("MX lookup failed for {domain}: {e}");
            stats.increment_error(ErrorType::MxLookupError);
            Vec::new()
        }
    }
}
