//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_auth_scan` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_auth_scan::initialization::init_logger_with;
use domain_auth_scan::{run_scan, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // Remote mode endpoints and keys may live in .env
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_scan(config).await {
        Ok(report) => {
            let stats = &report.statistics;
            eprintln!(
                "{} {} domain{} in {} mode in {:.1}s: average score {:.1}, {} secure, {} at risk, {} failed",
                if report.stopped { "Stopped after" } else { "Checked" },
                stats.total,
                if stats.total == 1 { "" } else { "s" },
                report.mode,
                report.elapsed_seconds,
                stats.average_score,
                stats.secure,
                stats.at_risk,
                stats.failed
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("domain_auth_scan error: {:#}", e);
            process::exit(1);
        }
    }
}
