//! Aggregate statistics and remediation advice over scan results.

mod recommendations;
mod statistics;

pub use recommendations::{recommendations, Priority, Protocol, Recommendation};
pub use statistics::{ProtocolCounts, ScanStatistics, AT_RISK_BELOW, SECURE_SCORE};
