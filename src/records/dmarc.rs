//! DMARC analysis.

use crate::dns::{find_dmarc_record, DnsLookup, RecordKind};
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::models::{DmarcResult, Status};

/// Classification of a single `v=DMARC1` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmarcAnalysis {
    pub status: Status,
    /// Lowercased `p=` value, empty when the tag is missing
    pub policy: String,
}

/// Splits a DMARC record into `(tag, value)` pairs with lowercased tags.
fn tags<'a>(record: &'a str) -> impl Iterator<Item = (String, &'a str)> + 'a {
    record.split(';').filter_map(|part| {
        let (tag, value) = part.split_once('=')?;
        Some((tag.trim().to_ascii_lowercase(), value.trim()))
    })
}

/// Value of the tag `name` (case-insensitive) in a DMARC record.
pub fn dmarc_tag<'a>(record: &'a str, name: &str) -> Option<&'a str> {
    tags(record).find(|(tag, _)| tag == name).map(|(_, v)| v)
}

/// Classifies a DMARC record.
///
/// Any of these makes the record a `Warning`: missing `p=`, `p=none`,
/// `pct` absent or below 100, missing `rua=`. Conditions do not stack.
pub fn analyze_dmarc_record(record: &str) -> DmarcAnalysis {
    let policy = dmarc_tag(record, "p")
        .map(|p| p.to_ascii_lowercase())
        .unwrap_or_default();

    let pct = dmarc_tag(record, "pct").and_then(|v| v.parse::<u32>().ok());
    let has_rua = dmarc_tag(record, "rua").is_some();

    let weak = policy.is_empty()
        || policy == "none"
        || pct.map_or(true, |pct| pct < 100)
        || !has_rua;

    DmarcAnalysis {
        status: if weak { Status::Warning } else { Status::Ok },
        policy,
    }
}

/// Queries `_dmarc.<domain>` and classifies the first DMARC record found.
pub async fn check_dmarc(
    lookup: &dyn DnsLookup,
    domain: &str,
    stats: &ProcessingStats,
) -> DmarcResult {
    let name = format!("_dmarc.{domain}");
    let records = match lookup.lookup(&name, RecordKind::Txt).await {
        Ok(records) => records,
        Err(e) => {
            log::warn!("DMARC check failed for {domain}: {e}");
            stats.increment_error(ErrorType::DmarcLookupError);
            return DmarcResult::failed(e.to_string());
        }
    };

    let Some(record) = find_dmarc_record(&records) else {
        log::debug!("No DMARC record for {domain}");
        return DmarcResult::missing();
    };

    let analysis = analyze_dmarc_record(record);
    DmarcResult {
        status: analysis.status,
        record: record.to_string(),
        policy: analysis.policy,
        error: None,
    }
}
