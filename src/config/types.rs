//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CONCURRENT_REQUESTS, DEFAULT_DELAY_MS, DEFAULT_PROBE_DOMAIN,
    DEFAULT_SIMULATION_DELAY_MS, DNS_TIMEOUT_SECS,
};
use crate::mode::CheckMode;
use crate::records::DEFAULT_DKIM_SELECTORS;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which check mode to start with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeOption {
    /// Probe api, web, then offline; fall back to simulation
    Auto,
    Api,
    Web,
    Offline,
    Simulation,
}

impl ModeOption {
    /// The fixed mode requested, or `None` for automatic selection.
    pub fn fixed(self) -> Option<CheckMode> {
        match self {
            ModeOption::Auto => None,
            ModeOption::Api => Some(CheckMode::Api),
            ModeOption::Web => Some(CheckMode::Web),
            ModeOption::Offline => Some(CheckMode::Offline),
            ModeOption::Simulation => Some(CheckMode::Simulation),
        }
    }
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table for terminals
    Plain,
    Csv,
    /// One JSON object per line
    Jsonl,
}

/// Command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "domain_auth_scan",
    about = "Checks DMARC, SPF and DKIM posture for a list of domains.",
    version
)]
pub struct Opt {
    /// File to read domains from (use '-' for stdin)
    #[arg(value_parser)]
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Check mode
    #[arg(long, value_enum, default_value_t = ModeOption::Auto)]
    pub mode: ModeOption,

    /// Number of domains checked concurrently
    #[arg(long, default_value_t = DEFAULT_CONCURRENT_REQUESTS)]
    pub concurrent_requests: usize,

    /// Pause after each domain check, per worker (milliseconds)
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Disable the result cache
    #[arg(long)]
    pub no_cache: bool,

    /// DNS query timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub dns_timeout_secs: u64,

    /// DKIM selectors to probe (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub dkim_selectors: Vec<String>,

    /// Domain used to test whether DNS lookups work
    #[arg(long, default_value = DEFAULT_PROBE_DOMAIN)]
    pub probe_domain: String,

    /// Scanning service endpoint for api mode
    #[arg(long, env = "DOMAIN_AUTH_API_ENDPOINT")]
    pub api_endpoint: Option<String>,

    /// Scanning service key for api mode
    #[arg(long, env = "DOMAIN_AUTH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Web tool endpoint for web mode
    #[arg(long, env = "DOMAIN_AUTH_WEB_ENDPOINT")]
    pub web_endpoint: Option<String>,

    /// Artificial latency of simulation mode (milliseconds)
    #[arg(long, default_value_t = DEFAULT_SIMULATION_DELAY_MS)]
    pub simulation_delay_ms: u64,

    /// Seed for reproducible simulation results
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Write results to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print recommendations for every domain that needs attention
    #[arg(long)]
    pub recommendations: bool,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use domain_auth_scan::Config;
///
/// let config = Config {
///     concurrent_requests: 5,
///     delay_ms: 100,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// File to read domains from
    pub file: PathBuf,

    pub log_level: LogLevel,

    pub log_format: LogFormat,

    /// Initial mode; `Auto` probes for the best available one
    pub mode: ModeOption,

    /// Worker pool size
    pub concurrent_requests: usize,

    /// Per-worker pause after each check, in milliseconds
    pub delay_ms: u64,

    pub cache_enabled: bool,

    pub dns_timeout_secs: u64,

    /// DKIM selectors probed, in order
    pub dkim_selectors: Vec<String>,

    /// Known-good domain for the offline availability probe
    pub availability_probe_domain: String,

    pub api_endpoint: Option<String>,

    pub api_key: Option<String>,

    pub web_endpoint: Option<String>,

    pub simulation_delay_ms: u64,

    /// Fixed seed for simulation mode
    pub simulation_seed: Option<u64>,

    pub output_format: OutputFormat,

    /// Output path, stdout when `None`
    pub output: Option<PathBuf>,

    pub show_recommendations: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("domains.txt"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            mode: ModeOption::Auto,
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            delay_ms: DEFAULT_DELAY_MS,
            cache_enabled: true,
            dns_timeout_secs: DNS_TIMEOUT_SECS,
            dkim_selectors: DEFAULT_DKIM_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            availability_probe_domain: DEFAULT_PROBE_DOMAIN.to_string(),
            api_endpoint: None,
            api_key: None,
            web_endpoint: None,
            simulation_delay_ms: DEFAULT_SIMULATION_DELAY_MS,
            simulation_seed: None,
            output_format: OutputFormat::Plain,
            output: None,
            show_recommendations: false,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        let defaults = Config::default();
        let dkim_selectors: Vec<String> = opt
            .dkim_selectors
            .into_iter()
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            file: opt.file,
            log_level: opt.log_level,
            log_format: opt.log_format,
            mode: opt.mode,
            concurrent_requests: opt.concurrent_requests,
            delay_ms: opt.delay_ms,
            cache_enabled: !opt.no_cache,
            dns_timeout_secs: opt.dns_timeout_secs,
            dkim_selectors: if dkim_selectors.is_empty() {
                defaults.dkim_selectors
            } else {
                dkim_selectors
            },
            availability_probe_domain: opt.probe_domain,
            api_endpoint: opt.api_endpoint,
            api_key: opt.api_key,
            web_endpoint: opt.web_endpoint,
            simulation_delay_ms: opt.simulation_delay_ms,
            simulation_seed: opt.seed,
            output_format: opt.format,
            output: opt.output,
            show_recommendations: opt.recommendations,
        }
    }
}
