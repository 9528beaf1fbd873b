//! Error type definitions.
//!
//! This module defines the typed errors returned by the engine and the
//! counters used to track per-domain failures during a scan.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::dns::RecordKind;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// A logger was already installed.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Batch-level failures of [`crate::ScanClient::check_domains`].
///
/// These are the only errors that fail a whole scan; per-domain failures are
/// folded into that domain's result instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Another batch scan is already running on this client.
    #[error("a scan is already in progress")]
    AlreadyScanning,

    /// The input contained no syntactically valid domain.
    #[error("no valid domains to scan")]
    NoValidDomains,
}

/// Failures surfaced by a [`crate::dns::DnsLookup`] implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The query did not complete within the configured timeout.
    #[error("{kind} lookup for {name} timed out")]
    Timeout { name: String, kind: RecordKind },

    /// The resolver reported a failure other than "no records".
    #[error("{kind} lookup for {name} failed: {message}")]
    Resolver {
        name: String,
        kind: RecordKind,
        message: String,
    },
}

/// Types of errors that can occur while checking a domain.
///
/// These are counted, not propagated; see [`super::ProcessingStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(clippy::enum_variant_names)]
pub enum ErrorType {
    InvalidDomainError,
    DmarcLookupError,
    SpfLookupError,
    DkimLookupError,
    MxLookupError,
    DomainCheckError,
    ProgressCallbackError,
}

/// Types of informational metrics recorded during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    CacheHit,
    DomainChecked,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidDomainError => "Invalid domain format",
            ErrorType::DmarcLookupError => "DMARC lookup error",
            ErrorType::SpfLookupError => "SPF lookup error",
            ErrorType::DkimLookupError => "DKIM selector lookup error",
            ErrorType::MxLookupError => "MX lookup error",
            ErrorType::DomainCheckError => "Domain check failed",
            ErrorType::ProgressCallbackError => "Progress callback panicked",
        }
    }
}

impl std::fmt::Display for InfoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::CacheHit => "Cache hit",
            InfoType::DomainChecked => "Domain checked",
        }
    }
}
