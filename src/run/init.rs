//! Scan client initialization.

use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::config::Config;
use crate::dns::{DnsLookup, HickoryLookup};
use crate::initialization::init_resolver;
use crate::mode::CheckMode;
use crate::scan::ScanClient;

/// Builds the DNS port offline mode queries.
pub fn init_lookup(config: &Config) -> Arc<dyn DnsLookup> {
    let resolver = init_resolver(config.dns_timeout_secs);
    Arc::new(HickoryLookup::new(
        resolver,
        Duration::from_secs(config.dns_timeout_secs.max(1)),
    ))
}

/// Creates the client and settles on a mode: the configured one, or the
/// best available when the configuration asks for automatic selection.
pub async fn init_client(lookup: Arc<dyn DnsLookup>, config: &Config) -> (ScanClient, CheckMode) {
    let client = ScanClient::from_config(lookup, config);
    let mode = match config.mode.fixed() {
        Some(mode) => {
            info!("Using {mode} mode");
            mode
        }
        None => client.select_best_available_mode().await,
    };
    if mode == CheckMode::Simulation {
        info!("Simulation mode: results are synthetic, not real DNS data");
    }
    (client, mode)
}
