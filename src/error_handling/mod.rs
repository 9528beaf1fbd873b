//! Error handling and processing statistics.
//!
//! This module provides:
//! - Typed errors for initialization, batch scans and DNS lookups
//! - Thread-safe counters for per-domain failures
//!
//! Per-domain failures never escalate: they are recorded here and folded
//! into that domain's result. Only [`ScanError`] fails a whole batch.

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{ErrorType, InfoType, InitializationError, LookupError, ScanError};
