//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, defaults, limits)
//! - The library [`Config`] and the CLI [`Opt`] that converts into it

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, ModeOption, Opt, OutputFormat};
