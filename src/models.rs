//! Result model shared by the record parser, the mode checkers and the scanner.
//!
//! A [`DomainCheckResult`] is produced once per scanned domain and is never
//! mutated afterwards; a re-scan replaces it wholesale.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Outcome of a single protocol analysis.
///
/// Severity for aggregation is `Error > Warning > Ok`; see [`Status::severity`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    /// Record present and configured well
    Ok,
    /// Record present but weak or incomplete
    Warning,
    /// Record missing, invalid, or the lookup failed
    Error,
}

impl Status {
    /// Numeric severity, higher is worse.
    pub fn severity(self) -> u8 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Error => 2,
        }
    }

    /// Returns the more severe of two statuses.
    pub fn worst(self, other: Status) -> Status {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

/// DMARC analysis outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmarcResult {
    pub status: Status,
    /// The selected `v=DMARC1` record, empty when none was found
    pub record: String,
    /// Value of the `p=` tag, empty when absent
    pub policy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DmarcResult {
    pub fn missing() -> Self {
        Self {
            status: Status::Error,
            record: String::new(),
            policy: String::new(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::missing()
        }
    }
}

/// SPF analysis outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpfResult {
    pub status: Status,
    pub record: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SpfResult {
    pub fn missing() -> Self {
        Self {
            status: Status::Error,
            record: String::new(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::missing()
        }
    }
}

/// DKIM analysis outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DkimResult {
    pub status: Status,
    /// Selectors that resolved to a plausible DKIM key, in probe order
    pub selectors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DkimResult {
    pub fn missing() -> Self {
        Self {
            status: Status::Error,
            selectors: Vec::new(),
            error: None,
        }
    }
}

/// Full result of checking one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainCheckResult {
    pub domain: String,
    pub dmarc: DmarcResult,
    pub spf: SpfResult,
    pub dkim: DkimResult,
    pub mx: Vec<String>,
    pub security_score: u8,
    /// Set only when the whole check failed; all statuses are then `Error`
    /// and the score is 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DomainCheckResult {
    /// Builds a fully failed result for `domain`.
    pub fn failed(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            dmarc: DmarcResult::missing(),
            spf: SpfResult::missing(),
            dkim: DkimResult::missing(),
            mx: Vec::new(),
            security_score: 0,
            error: Some(message.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Worst status across the three protocols.
    pub fn overall_status(&self) -> Status {
        self.dmarc
            .status
            .worst(self.spf.status)
            .worst(self.dkim.status)
    }
}
