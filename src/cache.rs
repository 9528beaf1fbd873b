//! In-memory result cache.
//!
//! Keyed by normalized domain. Entries never expire; only [`ResultCache::clear`]
//! removes them. Writers for the same domain race benignly: the last one wins.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::models::DomainCheckResult;

#[derive(Debug)]
pub struct ResultCache {
    entries: RwLock<HashMap<String, DomainCheckResult>>,
    enabled: AtomicBool,
}

impl ResultCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Disabling stops reads and writes but keeps existing entries.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Returns a copy of the cached result, or `None` on a miss or when the
    /// cache is disabled.
    pub fn get(&self, domain: &str) -> Option<DomainCheckResult> {
        if !self.is_enabled() {
            return None;
        }
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(domain).cloned()
    }

    pub fn insert(&self, result: &DomainCheckResult) {
        if !self.is_enabled() {
            return;
        }
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(result.domain.clone(), result.clone());
    }

    pub fn clear(&self) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let removed = entries.len();
        entries.clear();
        log::debug!("Cleared {removed} cached results");
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(true)
    }
}
