//! In-memory DNS lookup table.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use super::{DnsLookup, RecordKind};
use crate::error_handling::LookupError;

/// [`DnsLookup`] that answers from a fixed table.
///
/// Names missing from the table resolve to an empty list. Names registered
/// with [`StaticLookup::with_failure`] fail with [`LookupError::Resolver`].
/// Every call is counted, which lets tests assert that cached domains are
/// not looked up again.
#[derive(Debug, Default)]
pub struct StaticLookup {
    records: HashMap<(String, RecordKind), Vec<String>>,
    failures: HashSet<(String, RecordKind)>,
    delay: Duration,
    calls: AtomicUsize,
    calls_by_name: Mutex<HashMap<String, usize>>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_txt<I, S>(mut self, name: &str, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.records.insert(
            (name.to_ascii_lowercase(), RecordKind::Txt),
            records.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn with_mx<I, S>(mut self, name: &str, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.records.insert(
            (name.to_ascii_lowercase(), RecordKind::Mx),
            hosts.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn with_failure(mut self, name: &str, kind: RecordKind) -> Self {
        self.failures.insert((name.to_ascii_lowercase(), kind));
        self
    }

    /// Delays every answer, simulating network latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Total number of lookups served.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of lookups whose name ends with `suffix`.
    pub fn calls_for(&self, suffix: &str) -> usize {
        let calls = self
            .calls_by_name
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        calls
            .iter()
            .filter(|(name, _)| name.ends_with(suffix))
            .map(|(_, count)| *count)
            .sum()
    }

    fn answer(&self, name: &str, kind: RecordKind) -> Result<Vec<String>, LookupError> {
        let key = (name.to_ascii_lowercase(), kind);
        if self.failures.contains(&key) {
            return Err(LookupError::Resolver {
                name: name.to_string(),
                kind,
                message: "injected failure".to_string(),
            });
        }
        Ok(self.records.get(&key).cloned().unwrap_or_default())
    }
}

impl DnsLookup for StaticLookup {
    fn lookup<'a>(
        &'a self,
        name: &'a str,
        kind: RecordKind,
    ) -> BoxFuture<'a, Result<Vec<String>, LookupError>> {
        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            {
                let mut calls = self
                    .calls_by_name
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                *calls.entry(name.to_ascii_lowercase()).or_insert(0) += 1;
            }
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.answer(name, kind)
        }
        .boxed()
    }
}
