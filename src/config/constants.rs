//! Configuration constants.
//!
//! Defaults for the scanner, the DNS layer and the CLI.

/// Default number of concurrent scan workers.
/// Kept low because every domain fans out into roughly ten DNS queries.
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 3;

/// Default pause each worker takes after checking a domain, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 500;

/// DNS query timeout in seconds.
/// Most queries complete in well under a second; 3s fails fast on dead
/// resolvers without flagging slow-but-working ones.
pub const DNS_TIMEOUT_SECS: u64 = 3;

/// Resolver-level retry attempts per query.
pub const DNS_ATTEMPTS: usize = 2;

/// Domain whose TXT records are looked up to decide whether offline mode
/// has working DNS.
pub const DEFAULT_PROBE_DOMAIN: &str = "google.com";

/// Artificial latency of the simulation mode, in milliseconds.
pub const DEFAULT_SIMULATION_DELAY_MS: u64 = 300;

/// Log a progress line every this many completed domains.
pub const LOGGING_INTERVAL: usize = 10;

/// Error attached to results for entries that fail domain validation.
pub const INVALID_DOMAIN_ERROR: &str = "invalid domain format";

/// Upper bound on concurrent workers regardless of configuration.
pub const MAX_CONCURRENT_REQUESTS: usize = 64;

