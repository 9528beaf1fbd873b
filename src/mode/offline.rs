//! DNS-lookup-based checking.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use super::{CheckMode, DomainChecker};
use crate::dns::{DnsLookup, RecordKind};
use crate::error_handling::ProcessingStats;
use crate::models::DomainCheckResult;
use crate::records::analyze_domain;

/// Checks domains by querying DNS directly through the lookup port.
pub struct OfflineChecker {
    lookup: Arc<dyn DnsLookup>,
    dkim_selectors: Vec<String>,
    probe_domain: String,
    stats: Arc<ProcessingStats>,
}

impl std::fmt::Debug for OfflineChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfflineChecker")
            .field("dkim_selectors", &self.dkim_selectors)
            .field("probe_domain", &self.probe_domain)
            .finish_non_exhaustive()
    }
}

impl OfflineChecker {
    /// # Arguments
    ///
    /// * `lookup` - DNS lookup port every query goes through
    /// * `dkim_selectors` - Selectors probed, in order
    /// * `probe_domain` - Known-good domain used by the availability check
    /// * `stats` - Shared failure counters
    pub fn new(
        lookup: Arc<dyn DnsLookup>,
        dkim_selectors: Vec<String>,
        probe_domain: impl Into<String>,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            lookup,
            dkim_selectors,
            probe_domain: probe_domain.into(),
            stats,
        }
    }
}

impl DomainChecker for OfflineChecker {
    fn mode(&self) -> CheckMode {
        CheckMode::Offline
    }

    fn check_domain<'a>(
        &'a self,
        domain: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<DomainCheckResult>> {
        async move {
            Ok(analyze_domain(self.lookup.as_ref(), domain, &self.dkim_selectors, &self.stats).await)
        }
        .boxed()
    }

    /// Available iff a TXT lookup of the probe domain returns records.
    fn check_availability(&self) -> BoxFuture<'_, bool> {
        async move {
            match self.lookup.lookup(&self.probe_domain, RecordKind::Txt).await {
                Ok(records) => !records.is_empty(),
                Err(e) => {
                    log::debug!("Offline mode unavailable: {e}");
                    false
                }
            }
        }
        .boxed()
    }
}
