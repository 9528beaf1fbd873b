//! Automatic mode selection.

use super::{CheckMode, DomainChecker};

/// Modes probed by [`select_best_available`], most preferred first.
/// Simulation is the fallback and is never probed.
pub const MODE_PREFERENCE: [CheckMode; 3] = [CheckMode::Api, CheckMode::Web, CheckMode::Offline];

/// Probes `checkers` in [`MODE_PREFERENCE`] order and returns the first
/// available mode, or [`CheckMode::Simulation`] if none is.
///
/// Probing stops at the first available mode.
pub async fn select_best_available<'a, F>(checker_for: F) -> CheckMode
where
    F: Fn(CheckMode) -> &'a dyn DomainChecker,
{
    for mode in MODE_PREFERENCE {
        let checker = checker_for(mode);
        if checker.check_availability().await {
            log::info!("Selected {mode} mode");
            return mode;
        }
        log::debug!("{mode} mode unavailable");
    }
    log::info!("No live mode available, falling back to simulation");
    CheckMode::Simulation
}
