//! JSONL export.
//!
//! Each line is a complete JSON object for one domain, in the same shape
//! as the library's serialized [`DomainCheckResult`]. Suited to `jq` and
//! bulk loading.

use anyhow::{Context, Result};
use std::io::Write;

use crate::models::DomainCheckResult;

/// Writes `results` as JSON Lines.
///
/// # Returns
///
/// The number of lines written.
pub fn write_jsonl<W: Write>(results: &[DomainCheckResult], mut writer: W) -> Result<usize> {
    for result in results {
        serde_json::to_writer(&mut writer, result)
            .with_context(|| format!("Failed to serialize result for {}", result.domain))?;
        writer.write_all(b"\n")?;
    }
    writer.flush().context("Failed to flush JSONL output")?;
    Ok(results.len())
}
