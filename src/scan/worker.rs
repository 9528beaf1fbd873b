//! Worker pool internals.
//!
//! Workers drain one shared FIFO queue. Each worker checks the batch's
//! cancellation token before every pop; a stop request therefore lets
//! in-flight checks finish but starts nothing new.

use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use super::{ClientInner, ProgressCallback};
use crate::error_handling::ErrorType;
use crate::models::DomainCheckResult;

/// State shared by the workers of one batch.
pub(crate) struct Batch {
    queue: Mutex<VecDeque<String>>,
    results: Mutex<Vec<DomainCheckResult>>,
    generation: u64,
    pub(crate) cancel: CancellationToken,
    on_progress: Option<ProgressCallback>,
}

impl Batch {
    pub(crate) fn new(
        domains: Vec<String>,
        generation: u64,
        cancel: CancellationToken,
        on_progress: Option<ProgressCallback>,
    ) -> Self {
        Self {
            queue: Mutex::new(domains.into()),
            results: Mutex::new(Vec::new()),
            generation,
            cancel,
            on_progress,
        }
    }

    fn pop(&self) -> Option<String> {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
    }

    pub(crate) fn push_result(&self, result: DomainCheckResult) {
        self.results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(result);
    }

    pub(crate) fn take_results(&self) -> Vec<DomainCheckResult> {
        std::mem::take(
            &mut *self
                .results
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    /// Invokes the progress callback, swallowing any panic it raises.
    pub(crate) fn report(
        &self,
        inner: &ClientInner,
        processed: usize,
        total: usize,
        result: &DomainCheckResult,
    ) {
        let Some(callback) = &self.on_progress else {
            return;
        };
        let outcome =
            std::panic::catch_unwind(AssertUnwindSafe(|| callback(processed, total, result)));
        if outcome.is_err() {
            log::warn!(
                "Progress callback panicked at {processed}/{total} ({}); continuing scan",
                result.domain
            );
            inner.stats.increment_error(ErrorType::ProgressCallbackError);
        }
    }
}

/// One worker: pop, check, record, report, pause, repeat.
pub(crate) async fn run_worker(inner: Arc<ClientInner>, batch: Arc<Batch>, worker_id: usize) {
    let mut handled = 0usize;
    loop {
        if batch.cancel.is_cancelled() {
            log::debug!("Worker {worker_id} observed stop request");
            break;
        }
        let Some(domain) = batch.pop() else {
            break;
        };

        let (result, cached) = inner.check_normalized(&domain).await;
        batch.push_result(result.clone());
        // A batch abandoned by its caller stops reporting
        if let Some((processed, total)) = inner.complete_one(batch.generation) {
            batch.report(&inner, processed, total, &result);
        }
        handled += 1;

        if !cached {
            let delay = inner.delay();
            // Applies after the last item too
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }
    log::debug!("Worker {worker_id} finished after {handled} domains");
}

/// Number of workers for a batch of `valid_count` domains.
pub(crate) fn pool_size(concurrent_requests: usize, valid_count: usize) -> usize {
    concurrent_requests.min(valid_count).max(1)
}

