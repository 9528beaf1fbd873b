//! Batch scan orchestration.
//!
//! [`ScanClient`] owns the active check mode, the result cache and the
//! worker pool. A batch call goes through:
//!
//! 1. normalize and dedupe the input, split valid from invalid entries
//! 2. materialize invalid entries as error results
//! 3. drain the valid entries with `min(concurrent_requests, valid)` workers
//! 4. reassemble results in input order
//!
//! At most one batch runs per client at a time.

mod checkers;
mod state;
mod worker;

use std::collections::{HashMap, HashSet};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::cache::ResultCache;
use crate::config::{Config, INVALID_DOMAIN_ERROR, MAX_CONCURRENT_REQUESTS};
use crate::dns::DnsLookup;
use crate::domain::{is_valid_domain, normalize_domain};
use crate::error_handling::{ErrorType, InfoType, ProcessingStats, ScanError};
use crate::mode::{select_best_available, CheckMode};
use crate::models::DomainCheckResult;

pub use checkers::ModeCheckers;
pub use state::{ScanState, ScanStatus};

use worker::{pool_size, run_worker, Batch};

/// Progress callback: `(processed, total, result)`.
///
/// Invoked in completion order, possibly from several workers. Treat
/// `processed` as a count, not an index. Panics are caught and logged.
pub type ProgressCallback = Arc<dyn Fn(usize, usize, &DomainCheckResult) + Send + Sync>;

/// Capacity of the mode-change channel; slow subscribers miss old events.
const MODE_EVENT_CAPACITY: usize = 16;

pub(crate) struct ClientInner {
    checkers: ModeCheckers,
    mode: RwLock<CheckMode>,
    cache: Arc<ResultCache>,
    pub(crate) stats: Arc<ProcessingStats>,
    state: Mutex<ScanState>,
    /// Bumped at every batch start; workers of an abandoned batch no longer match
    generation: AtomicU64,
    cancel: Mutex<Option<CancellationToken>>,
    delay_ms: AtomicU64,
    concurrent_requests: AtomicUsize,
    mode_events: broadcast::Sender<CheckMode>,
}

impl ClientInner {
    fn lock_state(&self) -> std::sync::MutexGuard<'_, ScanState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn current_mode(&self) -> CheckMode {
        *self
            .mode
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms.load(Ordering::SeqCst))
    }

    /// Counts one completed domain of batch `generation`.
    ///
    /// Returns `None` when that batch is no longer the current one.
    pub(crate) fn complete_one(&self, generation: u64) -> Option<(usize, usize)> {
        let mut state = self.lock_state();
        if self.generation.load(Ordering::SeqCst) != generation {
            return None;
        }
        Some(state.complete_one())
    }

    /// Checks one normalized, valid domain through the cache and the active
    /// mode. Returns the result and whether it came from the cache.
    pub(crate) async fn check_normalized(&self, domain: &str) -> (DomainCheckResult, bool) {
        if let Some(hit) = self.cache.get(domain) {
            log::debug!("Cache hit for {domain}");
            self.stats.increment_info(InfoType::CacheHit);
            return (hit, true);
        }

        let mode = self.current_mode();
        let checker = Arc::clone(self.checkers.get(mode));
        let outcome = AssertUnwindSafe(checker.check_domain(domain))
            .catch_unwind()
            .await;

        let result = match outcome {
            Ok(Ok(result)) => {
                self.cache.insert(&result);
                result
            }
            Ok(Err(e)) => {
                log::warn!("Failed to check {domain} in {mode} mode: {e:#}");
                self.stats.increment_error(ErrorType::DomainCheckError);
                DomainCheckResult::failed(domain, e.to_string())
            }
            Err(_) => {
                log::warn!("Check of {domain} in {mode} mode panicked");
                self.stats.increment_error(ErrorType::DomainCheckError);
                DomainCheckResult::failed(domain, format!("{mode} check panicked"))
            }
        };
        (result, false)
    }
}

/// Resets the client to idle when a batch ends, including when the caller
/// drops the `check_domains` future mid-scan.
struct ScanGuard<'a> {
    inner: &'a ClientInner,
    cancel: CancellationToken,
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        // Workers still running after an abandoned batch stop at their next pop
        self.cancel.cancel();
        let mut state = self.inner.lock_state();
        *self
            .inner
            .cancel
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        state.is_scanning = false;
    }
}

/// Multi-mode domain security scanner.
///
/// Cheap to clone; clones share mode, cache and scan state.
#[derive(Clone)]
pub struct ScanClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for ScanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanClient")
            .field("status", &self.scan_status())
            .field("cached", &self.inner.cache.len())
            .finish_non_exhaustive()
    }
}

impl ScanClient {
    /// Creates a client from explicit collaborators.
    ///
    /// # Arguments
    ///
    /// * `checkers` - One checker per mode
    /// * `cache` - Result cache, may be shared with other clients
    /// * `stats` - Failure counters
    /// * `initial_mode` - Mode active until changed
    pub fn new(
        checkers: ModeCheckers,
        cache: Arc<ResultCache>,
        stats: Arc<ProcessingStats>,
        initial_mode: CheckMode,
    ) -> Self {
        let (mode_events, _) = broadcast::channel(MODE_EVENT_CAPACITY);
        Self {
            inner: Arc::new(ClientInner {
                checkers,
                mode: RwLock::new(initial_mode),
                cache,
                stats,
                state: Mutex::new(ScanState::default()),
                generation: AtomicU64::new(0),
                cancel: Mutex::new(None),
                delay_ms: AtomicU64::new(crate::config::DEFAULT_DELAY_MS),
                concurrent_requests: AtomicUsize::new(crate::config::DEFAULT_CONCURRENT_REQUESTS),
                mode_events,
            }),
        }
    }

    /// Creates a client with the standard checkers over `lookup`.
    ///
    /// The initial mode is the configured fixed mode, or simulation when the
    /// configuration asks for automatic selection (call
    /// [`ScanClient::select_best_available_mode`] to probe).
    pub fn from_config(lookup: Arc<dyn DnsLookup>, config: &Config) -> Self {
        let stats = Arc::new(ProcessingStats::new());
        let checkers = ModeCheckers::from_config(lookup, config, Arc::clone(&stats));
        let cache = Arc::new(ResultCache::new(config.cache_enabled));
        let client = Self::new(
            checkers,
            cache,
            stats,
            config.mode.fixed().unwrap_or(CheckMode::Simulation),
        );
        client.set_delay(config.delay_ms);
        client.set_concurrent_requests(config.concurrent_requests);
        client
    }

    /// Scans a batch of domains and returns one result per distinct entry,
    /// in input order.
    ///
    /// Entries are trimmed and lowercased; blanks are dropped and duplicates
    /// collapse onto their first occurrence. Invalid entries become error
    /// results without touching the network. After [`ScanClient::stop_scan`]
    /// the list holds only the domains that completed.
    ///
    /// # Errors
    ///
    /// - [`ScanError::AlreadyScanning`] if a batch is running on this client
    /// - [`ScanError::NoValidDomains`] if no entry is a valid domain
    ///
    /// Neither error touches the running scan's state.
    pub async fn check_domains<S: AsRef<str>>(
        &self,
        domains: &[S],
        on_progress: Option<ProgressCallback>,
    ) -> Result<Vec<DomainCheckResult>, ScanError> {
        let mut seen = HashSet::new();
        let ordered: Vec<String> = domains
            .iter()
            .map(|raw| normalize_domain(raw.as_ref()))
            .filter(|domain| !domain.is_empty())
            .filter(|domain| seen.insert(domain.clone()))
            .collect();
        let (valid, invalid): (Vec<String>, Vec<String>) = ordered
            .iter()
            .cloned()
            .partition(|domain| is_valid_domain(domain));

        let cancel = CancellationToken::new();
        let generation;
        {
            let mut state = self.inner.lock_state();
            if state.is_scanning {
                log::warn!("Rejected scan request: a scan is already in progress");
                return Err(ScanError::AlreadyScanning);
            }
            if valid.is_empty() {
                log::warn!("Rejected scan request: no valid domains among {} entries", ordered.len());
                return Err(ScanError::NoValidDomains);
            }
            state.begin(ordered.len());
            generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            // Stored under the state lock so a concurrent stop_scan always sees it
            *self
                .inner
                .cancel
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(cancel.clone());
        }
        let _guard = ScanGuard {
            inner: &self.inner,
            cancel: cancel.clone(),
        };

        let total = ordered.len();
        let workers = pool_size(
            self.inner.concurrent_requests.load(Ordering::SeqCst),
            valid.len(),
        );
        log::info!(
            "Starting scan of {total} domains ({} valid, {} invalid) in {} mode with {workers} workers",
            valid.len(),
            invalid.len(),
            self.mode()
        );

        let batch = Arc::new(Batch::new(valid, generation, cancel, on_progress));

        for domain in invalid {
            self.inner.stats.increment_error(ErrorType::InvalidDomainError);
            let result = DomainCheckResult::failed(domain, INVALID_DOMAIN_ERROR);
            batch.push_result(result.clone());
            if let Some((processed, total)) = self.inner.complete_one(generation) {
                batch.report(&self.inner, processed, total, &result);
            }
        }

        let mut tasks: FuturesUnordered<_> = (0..workers)
            .map(|worker_id| {
                tokio::spawn(run_worker(
                    Arc::clone(&self.inner),
                    Arc::clone(&batch),
                    worker_id,
                ))
            })
            .collect();
        while let Some(task_result) = tasks.next().await {
            if let Err(join_error) = task_result {
                log::warn!("Scan worker panicked: {:?}", join_error);
            }
        }

        let stopped = batch.cancel.is_cancelled();
        let mut by_domain: HashMap<String, DomainCheckResult> = batch
            .take_results()
            .into_iter()
            .map(|result| (result.domain.clone(), result))
            .collect();
        let results: Vec<DomainCheckResult> = ordered
            .iter()
            .filter_map(|domain| by_domain.remove(domain))
            .collect();

        if stopped {
            log::info!("Scan stopped after {} of {total} domains", results.len());
        } else {
            log::info!("Scan completed: {} domains", results.len());
        }
        Ok(results)
    }

    /// Checks a single domain through the cache and the active mode.
    ///
    /// Never fails: invalid input and check failures come back as error
    /// results.
    pub async fn check_domain(&self, domain: &str) -> DomainCheckResult {
        let domain = normalize_domain(domain);
        if !is_valid_domain(&domain) {
            self.inner.stats.increment_error(ErrorType::InvalidDomainError);
            return DomainCheckResult::failed(domain, INVALID_DOMAIN_ERROR);
        }
        self.inner.check_normalized(&domain).await.0
    }

    /// Requests a cooperative stop of the running batch.
    ///
    /// In-flight checks finish; no new domain is started. Returns `false`
    /// when no scan is running.
    pub fn stop_scan(&self) -> bool {
        let mut state = self.inner.lock_state();
        if !state.is_scanning {
            return false;
        }
        state.should_stop = true;
        if let Some(cancel) = self
            .inner
            .cancel
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            cancel.cancel();
        }
        log::info!(
            "Stop requested at {}/{} domains",
            state.processed,
            state.total
        );
        true
    }

    pub fn scan_status(&self) -> ScanStatus {
        ScanStatus {
            state: *self.inner.lock_state(),
            mode: self.mode(),
        }
    }

    /// Switches the active mode and notifies subscribers.
    ///
    /// Does not touch the cache.
    pub fn set_mode(&self, mode: CheckMode) {
        let previous = {
            let mut current = self
                .inner
                .mode
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::replace(&mut *current, mode)
        };
        if previous != mode {
            log::info!("Check mode changed: {previous} -> {mode}");
        }
        // No subscribers is fine
        let _ = self.inner.mode_events.send(mode);
    }

    pub fn mode(&self) -> CheckMode {
        self.inner.current_mode()
    }

    /// Probes api, web, then offline and activates the first available
    /// mode, falling back to simulation.
    pub async fn select_best_available_mode(&self) -> CheckMode {
        let checkers = &self.inner.checkers;
        let mode = select_best_available(|mode| checkers.get(mode).as_ref()).await;
        self.set_mode(mode);
        mode
    }

    /// Receives every mode set after subscribing.
    pub fn subscribe_mode_changes(&self) -> broadcast::Receiver<CheckMode> {
        self.inner.mode_events.subscribe()
    }

    pub fn clear_cache(&self) {
        self.inner.cache.clear();
    }

    pub fn set_cache_enabled(&self, enabled: bool) {
        self.inner.cache.set_enabled(enabled);
    }

    /// Sets the per-worker pause after each non-cached check.
    pub fn set_delay(&self, ms: u64) {
        self.inner.delay_ms.store(ms, Ordering::SeqCst);
    }

    /// Sets the worker pool size for subsequent batches, clamped to
    /// `1..=MAX_CONCURRENT_REQUESTS`.
    pub fn set_concurrent_requests(&self, n: usize) {
        let clamped = n.clamp(1, MAX_CONCURRENT_REQUESTS);
        if clamped != n {
            log::warn!("Concurrent requests {n} out of range, using {clamped}");
        }
        self.inner
            .concurrent_requests
            .store(clamped, Ordering::SeqCst);
    }

    pub fn concurrent_requests(&self) -> usize {
        self.inner.concurrent_requests.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> Arc<ProcessingStats> {
        Arc::clone(&self.inner.stats)
    }

    pub fn cache(&self) -> Arc<ResultCache> {
        Arc::clone(&self.inner.cache)
    }
}

#[cfg(test)]
mod tests;
