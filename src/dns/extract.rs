//! DNS record extraction utilities.
//!
//! Picks the relevant record out of a TXT answer set. Matching is by
//! substring so records with leading whitespace or reordered tags still
//! count.

/// Returns the first TXT record containing `v=spf1`.
pub fn find_spf_record(txt_records: &[String]) -> Option<&str> {
    txt_records
        .iter()
        .map(|txt| txt.trim())
        .find(|txt| txt.contains("v=spf1"))
}

/// Returns the first TXT record containing `v=DMARC1`.
pub fn find_dmarc_record(txt_records: &[String]) -> Option<&str> {
    txt_records
        .iter()
        .map(|txt| txt.trim())
        .find(|txt| txt.contains("v=DMARC1"))
}

/// Returns the first TXT record that looks like a DKIM public key.
///
/// A record qualifies if it carries `v=DKIM1`, `k=rsa` or a `p=` tag.
pub fn find_dkim_key(txt_records: &[String]) -> Option<&str> {
    txt_records
        .iter()
        .map(|txt| txt.trim())
        .find(|txt| txt.contains("v=DKIM1") || txt.contains("k=rsa") || txt.contains("p="))
}
