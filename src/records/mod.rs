//! Record parser: classifies a domain's DMARC, SPF and DKIM posture.
//!
//! Each analysis queries the [`DnsLookup`] port independently. A failed
//! lookup downgrades only that analysis to `Error` (with the message
//! attached) and never aborts its siblings.

mod dkim;
mod dmarc;
mod mx;
mod spf;

use crate::dns::DnsLookup;
use crate::error_handling::{InfoType, ProcessingStats};
use crate::models::DomainCheckResult;
use crate::score::security_score;

pub use dkim::{check_dkim, DEFAULT_DKIM_SELECTORS};
pub use dmarc::{analyze_dmarc_record, check_dmarc, dmarc_tag, DmarcAnalysis};
pub use mx::check_mx;
pub use spf::{analyze_spf_record, check_spf};

/// Runs all four analyses for `domain` and scores the outcome.
///
/// `domain` must already be normalized and validated.
pub async fn analyze_domain(
    lookup: &dyn DnsLookup,
    domain: &str,
    dkim_selectors: &[String],
    stats: &ProcessingStats,
) -> DomainCheckResult {
    let (dmarc, spf, dkim, mx) = tokio::join!(
        check_dmarc(lookup, domain, stats),
        check_spf(lookup, domain, stats),
        check_dkim(lookup, domain, dkim_selectors, stats),
        check_mx(lookup, domain, stats),
    );

    let security_score = security_score(dmarc.status, spf.status, dkim.status);
    stats.increment_info(InfoType::DomainChecked);
    log::debug!(
        "{domain}: dmarc={} spf={} dkim={} score={security_score}",
        dmarc.status,
        spf.status,
        dkim.status
    );

    DomainCheckResult {
        domain: domain.to_string(),
        dmarc,
        spf,
        dkim,
        mx,
        security_score,
        error: None,
    }
}
