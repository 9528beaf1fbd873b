//! Batch-level statistics.

use serde::Serialize;

use crate::models::{DomainCheckResult, Status};

/// Domains scoring at least this are counted as secure.
pub const SECURE_SCORE: u8 = 80;

/// Domains scoring below this are counted as at risk.
pub const AT_RISK_BELOW: u8 = 50;

/// Ok/warning/error tally for one protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProtocolCounts {
    pub ok: usize,
    pub warning: usize,
    pub error: usize,
}

impl ProtocolCounts {
    fn add(&mut self, status: Status) {
        match status {
            Status::Ok => self.ok += 1,
            Status::Warning => self.warning += 1,
            Status::Error => self.error += 1,
        }
    }
}

/// Summary of a batch of results.
///
/// Failed checks (results with `error` set) count towards `total` and
/// `failed` only; they are excluded from protocol counts and the average.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatistics {
    pub total: usize,
    pub failed: usize,
    pub dmarc: ProtocolCounts,
    pub spf: ProtocolCounts,
    pub dkim: ProtocolCounts,
    /// Mean score over checked domains, 0 when none were checked
    pub average_score: f64,
    pub secure: usize,
    pub at_risk: usize,
}

impl ScanStatistics {
    pub fn from_results(results: &[DomainCheckResult]) -> Self {
        let mut stats = ScanStatistics {
            total: results.len(),
            ..Default::default()
        };
        let mut score_sum = 0u64;

        for result in results {
            if result.is_failed() {
                stats.failed += 1;
                continue;
            }
            stats.dmarc.add(result.dmarc.status);
            stats.spf.add(result.spf.status);
            stats.dkim.add(result.dkim.status);
            score_sum += u64::from(result.security_score);
            if result.security_score >= SECURE_SCORE {
                stats.secure += 1;
            } else if result.security_score < AT_RISK_BELOW {
                stats.at_risk += 1;
            }
        }

        let checked = stats.checked();
        if checked > 0 {
            stats.average_score = score_sum as f64 / checked as f64;
        }
        stats
    }

    /// Domains whose check completed.
    pub fn checked(&self) -> usize {
        self.total - self.failed
    }

    /// Logs a short summary at info level.
    pub fn log_summary(&self) {
        log::info!(
            "Checked {} of {} domains (average score {:.1}, {} secure, {} at risk)",
            self.checked(),
            self.total,
            self.average_score,
            self.secure,
            self.at_risk
        );
        for (name, counts) in [("DMARC", self.dmarc), ("SPF", self.spf), ("DKIM", self.dkim)] {
            log::info!(
                "   {name}: {} ok, {} warning, {} error",
                counts.ok,
                counts.warning,
                counts.error
            );
        }
        if self.failed > 0 {
            log::info!("   {} domains could not be checked", self.failed);
        }
    }
}
