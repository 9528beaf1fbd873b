//! domain_auth_scan library: email-authentication posture scanning
//!
//! Checks a batch of domains for DMARC, SPF and DKIM records, scores each
//! domain's posture from 0 to 100, and reports MX hosts. Lookups run on a
//! bounded worker pool with per-worker pacing, a result cache and
//! cooperative cancellation.
//!
//! Four check modes share one result model: `offline` (direct DNS), `api`
//! and `web` (remote services, currently backed by simulation), and
//! `simulation` (synthetic, internally consistent results).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use domain_auth_scan::{init_lookup, Config, ScanClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     delay_ms: 100,
//!     ..Default::default()
//! };
//! let client = ScanClient::from_config(init_lookup(&config), &config);
//! client.select_best_available_mode().await;
//!
//! let results = client.check_domains(&["example.com", "gmail.com"], None).await?;
//! for result in &results {
//!     println!("{}: {}", result.domain, result.security_score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
mod cache;
pub mod config;
pub mod dns;
mod domain;
mod error_handling;
pub mod export;
pub mod initialization;
pub mod mode;
mod models;
pub mod records;
pub mod report;
mod run;
mod scan;
mod score;

// Re-export public API
pub use app::parse_domain_list;
pub use cache::ResultCache;
pub use config::{Config, LogFormat, LogLevel, ModeOption, Opt, OutputFormat};
pub use dns::{DnsLookup, HickoryLookup, RecordKind, StaticLookup};
pub use domain::{is_valid_domain, normalize_domain};
pub use error_handling::{
    ErrorType, InfoType, InitializationError, LookupError, ProcessingStats, ScanError,
};
pub use mode::{CheckMode, DomainChecker};
pub use models::{DkimResult, DmarcResult, DomainCheckResult, SpfResult, Status};
pub use run::{init_client, init_lookup, run_scan, ScanReport};
pub use scan::{ModeCheckers, ProgressCallback, ScanClient, ScanState, ScanStatus};
pub use score::security_score;
