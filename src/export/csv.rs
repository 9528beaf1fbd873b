//! CSV export.
//!
//! One row per domain, with list-valued fields joined by `;`.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;

use crate::models::DomainCheckResult;

const HEADER: [&str; 11] = [
    "domain",
    "security_score",
    "dmarc_status",
    "dmarc_policy",
    "dmarc_record",
    "spf_status",
    "spf_record",
    "dkim_status",
    "dkim_selectors",
    "mx",
    "error",
];

/// Writes `results` as CSV with a header row.
///
/// # Returns
///
/// The number of data rows written.
pub fn write_csv<W: Write>(results: &[DomainCheckResult], writer: W) -> Result<usize> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(HEADER)?;

    for result in results {
        writer
            .write_record([
                result.domain.as_str(),
                result.security_score.to_string().as_str(),
                result.dmarc.status.to_string().as_str(),
                result.dmarc.policy.as_str(),
                result.dmarc.record.as_str(),
                result.spf.status.to_string().as_str(),
                result.spf.record.as_str(),
                result.dkim.status.to_string().as_str(),
                result.dkim.selectors.join(";").as_str(),
                result.mx.join(";").as_str(),
                result.error.as_deref().unwrap_or(""),
            ])
            .with_context(|| format!("Failed to write CSV row for {}", result.domain))?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(results.len())
}
