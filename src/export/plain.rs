//! Human-readable table output.

use anyhow::Result;
use std::io::Write;

use crate::models::DomainCheckResult;

/// Writes an aligned table, one domain per line, followed by any
/// per-domain error on its own indented line.
pub fn write_plain<W: Write>(results: &[DomainCheckResult], mut writer: W) -> Result<usize> {
    let width = results
        .iter()
        .map(|r| r.domain.len())
        .max()
        .unwrap_or(0)
        .max("DOMAIN".len());

    writeln!(
        writer,
        "{:<width$}  {:>5}  {:<7}  {:<7}  {:<7}  {:<10}  MX",
        "DOMAIN", "SCORE", "DMARC", "SPF", "DKIM", "POLICY"
    )?;
    for result in results {
        let policy = if result.dmarc.policy.is_empty() {
            "-"
        } else {
            result.dmarc.policy.as_str()
        };
        writeln!(
            writer,
            "{:<width$}  {:>5}  {:<7}  {:<7}  {:<7}  {:<10}  {}",
            result.domain,
            result.security_score,
            result.dmarc.status.to_string(),
            result.spf.status.to_string(),
            result.dkim.status.to_string(),
            policy,
            result.mx.len()
        )?;
        if let Some(error) = &result.error {
            writeln!(writer, "{:<width$}  error: {error}", "")?;
        }
    }
    writer.flush()?;
    Ok(results.len())
}
