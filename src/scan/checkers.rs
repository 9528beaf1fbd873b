//! The set of checkers a scan client dispatches to.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::dns::DnsLookup;
use crate::error_handling::ProcessingStats;
use crate::mode::{CheckMode, DomainChecker, OfflineChecker, RemoteChecker, SimulationChecker};

/// One checker per [`CheckMode`].
#[derive(Clone)]
pub struct ModeCheckers {
    pub api: Arc<dyn DomainChecker>,
    pub web: Arc<dyn DomainChecker>,
    pub offline: Arc<dyn DomainChecker>,
    pub simulation: Arc<dyn DomainChecker>,
}

impl std::fmt::Debug for ModeCheckers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeCheckers").finish_non_exhaustive()
    }
}

impl ModeCheckers {
    /// Builds the standard checkers. Remote modes share the simulation
    /// checker as their fallback.
    pub fn from_config(
        lookup: Arc<dyn DnsLookup>,
        config: &Config,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        let delay = Duration::from_millis(config.simulation_delay_ms);
        let simulation = Arc::new(match config.simulation_seed {
            Some(seed) => SimulationChecker::seeded(seed, delay),
            None => SimulationChecker::new(delay),
        });

        Self {
            api: Arc::new(RemoteChecker::api(
                config.api_endpoint.clone(),
                config.api_key.clone(),
                Arc::clone(&simulation),
            )),
            web: Arc::new(RemoteChecker::web(
                config.web_endpoint.clone(),
                Arc::clone(&simulation),
            )),
            offline: Arc::new(OfflineChecker::new(
                lookup,
                config.dkim_selectors.clone(),
                config.availability_probe_domain.clone(),
                stats,
            )),
            simulation,
        }
    }

    pub fn get(&self, mode: CheckMode) -> &Arc<dyn DomainChecker> {
        match mode {
            CheckMode::Api => &self.api,
            CheckMode::Web => &self.web,
            CheckMode::Offline => &self.offline,
            CheckMode::Simulation => &self.simulation,
        }
    }
}
