//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_ATTEMPTS;

/// Builds the shared resolver used by offline mode.
///
/// Uses the default upstream configuration with a short per-query timeout
/// and few attempts, so a dead nameserver costs seconds rather than minutes
/// across a batch.
///
/// # Arguments
///
/// * `timeout_secs` - Per-query timeout; 0 is raised to 1
pub fn init_resolver(timeout_secs: u64) -> Arc<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(timeout_secs.max(1));
    opts.attempts = DNS_ATTEMPTS;
    // Names are always fully qualified; never append search domains
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}
