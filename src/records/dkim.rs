//! DKIM selector probing.

use futures::future::join_all;

use crate::dns::{find_dkim_key, DnsLookup, RecordKind};
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::models::{DkimResult, Status};

/// Selectors probed when none are configured, in probe order.
pub const DEFAULT_DKIM_SELECTORS: &[&str] =
    &["default", "google", "selector1", "selector2", "k1", "dkim"];

/// Probes `<selector>._domainkey.<domain>` for every selector.
///
/// A failed probe only counts as "not found" for that selector. Found
/// selectors keep probe order. Zero found is `Error`, one is `Warning`,
/// two or more is `Ok`.
pub async fn check_dkim(
    lookup: &dyn DnsLookup,
    domain: &str,
    selectors: &[String],
    stats: &ProcessingStats,
) -> DkimResult {
    let probes = selectors.iter().map(|selector| async move {
        let name = format!("{selector}._domainkey.{domain}");
        match lookup.lookup(&name, RecordKind::Txt).await {
            Ok(records) => find_dkim_key(&records).is_some(),
            Err(e) => {
                log::debug!("DKIM probe {name} failed: {e}");
                stats.increment_error(ErrorType::DkimLookupError);
                false
            }
        }
    });

    let found: Vec<String> = join_all(probes)
        .await
        .into_iter()
        .zip(selectors)
        .filter_map(|(found, selector)| found.then(|| selector.clone()))
        .collect();

    let status = match found.len() {
        0 => Status::Error,
        1 => Status::Warning,
        _ => Status::Ok,
    };

    DkimResult {
        status,
        selectors: found,
        error: None,
    }
}
