//! Synthetic results for demonstrations and tests.
//!
//! Statuses are random, but every record string is consistent with its
//! status: feeding a simulated record back through the record parser
//! yields the same status.

use std::sync::Mutex;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{CheckMode, DomainChecker};
use crate::models::{DkimResult, DmarcResult, DomainCheckResult, SpfResult, Status};
use crate::records::DEFAULT_DKIM_SELECTORS;
use crate::score::security_score;

#[derive(Debug)]
pub struct SimulationChecker {
    rng: Mutex<StdRng>,
    delay: Duration,
}

impl SimulationChecker {
    /// Seeds from the OS; each run produces different results.
    pub fn new(delay: Duration) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
            delay,
        }
    }

    /// Deterministic sequence of results for a given seed.
    pub fn seeded(seed: u64, delay: Duration) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            delay,
        }
    }

    fn generate(&self, domain: &str) -> DomainCheckResult {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let dmarc = simulate_dmarc(&mut *rng, domain);
        let spf = simulate_spf(&mut *rng, domain);
        let dkim = simulate_dkim(&mut *rng);
        let security_score = security_score(dmarc.status, spf.status, dkim.status);

        DomainCheckResult {
            domain: domain.to_string(),
            dmarc,
            spf,
            dkim,
            mx: vec![format!("mx1.{domain}"), format!("mx2.{domain}")],
            security_score,
            error: None,
        }
    }
}

fn random_status(rng: &mut impl Rng) -> Status {
    match rng.random_range(0..3) {
        0 => Status::Ok,
        1 => Status::Warning,
        _ => Status::Error,
    }
}

fn simulate_dmarc(rng: &mut impl Rng, domain: &str) -> DmarcResult {
    let status = random_status(rng);
    let policy = match status {
        Status::Ok if rng.random_bool(0.5) => "reject",
        Status::Ok => "quarantine",
        Status::Warning => "none",
        Status::Error => return DmarcResult::missing(),
    };
    DmarcResult {
        status,
        record: format!("v=DMARC1; p={policy}; rua=mailto:dmarc@{domain}; pct=100"),
        policy: policy.to_string(),
        error: None,
    }
}

fn simulate_spf(rng: &mut impl Rng, domain: &str) -> SpfResult {
    let status = random_status(rng);
    let qualifier = match status {
        Status::Ok if rng.random_bool(0.5) => "-all",
        Status::Ok => "~all",
        Status::Warning => "?all",
        Status::Error => return SpfResult::missing(),
    };
    SpfResult {
        status,
        record: format!("v=spf1 include:_spf.{domain} mx {qualifier}"),
        error: None,
    }
}

fn simulate_dkim(rng: &mut impl Rng) -> DkimResult {
    let status = random_status(rng);
    let wanted = match status {
        Status::Ok => 2,
        Status::Warning => 1,
        Status::Error => 0,
    };
    let mut picked: Vec<usize> = Vec::with_capacity(wanted);
    while picked.len() < wanted {
        let idx = rng.random_range(0..DEFAULT_DKIM_SELECTORS.len());
        if !picked.contains(&idx) {
            picked.push(idx);
        }
    }
    // keep probe order
    picked.sort_unstable();
    DkimResult {
        status,
        selectors: picked
            .into_iter()
            .map(|idx| DEFAULT_DKIM_SELECTORS[idx].to_string())
            .collect(),
        error: None,
    }
}

impl DomainChecker for SimulationChecker {
    fn mode(&self) -> CheckMode {
        CheckMode::Simulation
    }

    fn check_domain<'a>(
        &'a self,
        domain: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<DomainCheckResult>> {
        async move {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(self.generate(domain))
        }
        .boxed()
    }

    fn check_availability(&self) -> BoxFuture<'_, bool> {
        async { true }.boxed()
    }
}
