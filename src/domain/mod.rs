//! Domain name validation and normalization.
//!
//! Every domain handed to the scanner passes through [`normalize_domain`] and
//! [`is_valid_domain`] before any lookup is attempted. Entries that fail
//! validation never reach the DNS layer.

use std::sync::LazyLock;

use regex::Regex;

/// One or more labels followed by a TLD. Labels are 1-63 alphanumeric
/// characters with internal hyphens only.
static DOMAIN_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$",
    )
    .map_err(|e| log::error!("Failed to compile domain pattern: {e}"))
    .ok()
});

/// Maximum length of a full domain name in presentation format.
const MAX_DOMAIN_LENGTH: usize = 253;

/// Trims surrounding whitespace and lowercases a raw domain entry.
pub fn normalize_domain(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Returns `true` if `domain` is a syntactically valid domain name.
///
/// Pure check on the string as given; callers normalize first.
pub fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LENGTH {
        return false;
    }
    DOMAIN_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(domain))
}
