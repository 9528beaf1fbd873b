//! Check modes: the interchangeable mechanisms that answer a single-domain
//! query.
//!
//! Each mode is a value implementing [`DomainChecker`]. The scanner holds
//! one checker per mode and dispatches to whichever is active.

mod offline;
mod remote;
mod selection;
mod simulation;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::models::DomainCheckResult;

pub use offline::OfflineChecker;
pub use remote::RemoteChecker;
pub use selection::{select_best_available, MODE_PREFERENCE};
pub use simulation::SimulationChecker;

/// Backing mechanism a domain check runs through.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CheckMode {
    /// Remote authenticated scanning service
    Api,
    /// Third-party web tool
    Web,
    /// Direct DNS lookups
    Offline,
    /// Randomized but structurally valid results
    Simulation,
}

/// Capability shared by every check mode.
pub trait DomainChecker: Send + Sync {
    fn mode(&self) -> CheckMode;

    /// Checks one normalized, valid domain.
    ///
    /// An `Err` fails only this domain; the scanner turns it into an error
    /// result.
    fn check_domain<'a>(
        &'a self,
        domain: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<DomainCheckResult>>;

    /// Whether this mode can currently answer queries.
    fn check_availability(&self) -> BoxFuture<'_, bool>;
}
