//! Remediation advice derived from a single result.

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::models::{DomainCheckResult, Status};
use crate::records::dmarc_tag;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Protocol {
    Dmarc,
    Spf,
    Dkim,
    Mx,
}

/// One piece of advice for a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub protocol: Protocol,
    pub message: String,
}

impl Recommendation {
    fn new(priority: Priority, protocol: Protocol, message: impl Into<String>) -> Self {
        Self {
            priority,
            protocol,
            message: message.into(),
        }
    }
}

/// Lists what `result`'s owner should fix, most urgent first.
///
/// Failed checks yield no advice: nothing is known about the domain.
pub fn recommendations(result: &DomainCheckResult) -> Vec<Recommendation> {
    if result.is_failed() {
        return Vec::new();
    }
    let mut out = Vec::new();
    dmarc_advice(result, &mut out);
    spf_advice(result, &mut out);
    dkim_advice(result, &mut out);
    if result.mx.is_empty() {
        out.push(Recommendation::new(
            Priority::Low,
            Protocol::Mx,
            "No MX records: the domain receives no mail; a null SPF (v=spf1 -all) and p=reject DMARC stop spoofing",
        ));
    }
    // Stable: keeps protocol order within each priority
    out.sort_by_key(|r| r.priority);
    out
}

fn dmarc_advice(result: &DomainCheckResult, out: &mut Vec<Recommendation>) {
    let record = &result.dmarc.record;
    if record.is_empty() {
        let message = match &result.dmarc.error {
            Some(error) => format!("DMARC lookup failed ({error}); verify the _dmarc record is published"),
            None => "Publish a DMARC record at _dmarc with at least p=none and a rua= address".to_string(),
        };
        out.push(Recommendation::new(Priority::High, Protocol::Dmarc, message));
        return;
    }
    match result.dmarc.policy.as_str() {
        "" => out.push(Recommendation::new(
            Priority::High,
            Protocol::Dmarc,
            "DMARC record has no p= tag; add p=quarantine or p=reject",
        )),
        "none" => out.push(Recommendation::new(
            Priority::Medium,
            Protocol::Dmarc,
            "DMARC policy is p=none; move to p=quarantine, then p=reject",
        )),
        _ => {}
    }
    let pct = dmarc_tag(record, "pct").and_then(|v| v.parse::<u32>().ok());
    if pct.map_or(true, |pct| pct < 100) {
        out.push(Recommendation::new(
            Priority::Low,
            Protocol::Dmarc,
            "Apply the DMARC policy to 100% of mail (pct=100)",
        ));
    }
    if dmarc_tag(record, "rua").is_none() {
        out.push(Recommendation::new(
            Priority::Low,
            Protocol::Dmarc,
            "Add rua= to receive DMARC aggregate reports",
        ));
    }
}

fn spf_advice(result: &DomainCheckResult, out: &mut Vec<Recommendation>) {
    let record = &result.spf.record;
    if record.is_empty() {
        out.push(Recommendation::new(
            Priority::High,
            Protocol::Spf,
            "Publish an SPF record listing authorized senders and ending in -all or ~all",
        ));
    } else if record.contains("+all") {
        out.push(Recommendation::new(
            Priority::High,
            Protocol::Spf,
            "SPF +all authorizes every host; replace it with -all or ~all",
        ));
    } else if record.contains("?all") {
        out.push(Recommendation::new(
            Priority::Medium,
            Protocol::Spf,
            "SPF ?all is neutral; replace it with -all or ~all",
        ));
    } else if !record.contains("-all") && !record.contains("~all") {
        out.push(Recommendation::new(
            Priority::Medium,
            Protocol::Spf,
            "SPF record has no terminal all mechanism; end it with -all or ~all",
        ));
    }
}

fn dkim_advice(result: &DomainCheckResult, out: &mut Vec<Recommendation>) {
    match (result.dkim.status, result.dkim.selectors.len()) {
        (Status::Error, _) | (_, 0) => out.push(Recommendation::new(
            Priority::High,
            Protocol::Dkim,
            "No DKIM key found on common selectors; sign outgoing mail with DKIM",
        )),
        (_, 1) => out.push(Recommendation::new(
            Priority::Low,
            Protocol::Dkim,
            format!(
                "Only selector '{}' has a DKIM key; publish a second key for rotation",
                result.dkim.selectors[0]
            ),
        )),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DkimResult, DmarcResult, SpfResult};

    fn strong() -> DomainCheckResult {
        DomainCheckResult {
            domain: "example.com".to_string(),
            dmarc: DmarcResult {
                status: Status::Ok,
                record: "v=DMARC1; p=reject; rua=mailto:d@example.com; pct=100".to_string(),
                policy: "reject".to_string(),
                error: None,
            },
            spf: SpfResult {
                status: Status::Ok,
                record: "v=spf1 mx -all".to_string(),
                error: None,
            },
            dkim: DkimResult {
                status: Status::Ok,
                selectors: vec!["google".to_string(), "k1".to_string()],
                error: None,
            },
            mx: vec!["mx.example.com".to_string()],
            security_score: 100,
            error: None,
        }
    }

    #[test]
    fn test_well_configured_domain_needs_nothing() {
        assert!(recommendations(&strong()).is_empty());
    }

    #[test]
    fn test_failed_check_gives_no_advice() {
        let failed = DomainCheckResult::failed("x.com", "boom");
        assert!(recommendations(&failed).is_empty());
    }

    #[test]
    fn test_missing_everything() {
        let mut result = strong();
        result.dmarc = DmarcResult::missing();
        result.spf = SpfResult::missing();
        result.dkim = DkimResult::missing();
        result.mx.clear();
        let recs = recommendations(&result);
        let protocols: Vec<(Priority, Protocol)> =
            recs.iter().map(|r| (r.priority, r.protocol)).collect();
        assert_eq!(
            protocols,
            vec![
                (Priority::High, Protocol::Dmarc),
                (Priority::High, Protocol::Spf),
                (Priority::High, Protocol::Dkim),
                (Priority::Low, Protocol::Mx),
            ]
        );
    }

    #[test]
    fn test_weak_dmarc_tags() {
        let mut result = strong();
        result.dmarc.record = "v=DMARC1; p=none; pct=50".to_string();
        result.dmarc.policy = "none".to_string();
        let recs = recommendations(&result);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert!(recs[0].message.contains("p=none"));
        assert!(recs.iter().any(|r| r.message.contains("pct=100")));
        assert!(recs.iter().any(|r| r.message.contains("rua=")));
    }

    #[test]
    fn test_spf_qualifiers() {
        let mut result = strong();
        result.spf.record = "v=spf1 +all".to_string();
        assert_eq!(recommendations(&result)[0].priority, Priority::High);

        result.spf.record = "v=spf1 ?all".to_string();
        assert_eq!(recommendations(&result)[0].priority, Priority::Medium);

        result.spf.record = "v=spf1 mx".to_string();
        let recs = recommendations(&result);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert!(recs[0].message.contains("terminal"));
    }

    #[test]
    fn test_single_dkim_selector() {
        let mut result = strong();
        result.dkim.status = Status::Warning;
        result.dkim.selectors = vec!["selector1".to_string()];
        let recs = recommendations(&result);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].protocol, Protocol::Dkim);
        assert!(recs[0].message.contains("selector1"));
    }

    #[test]
    fn test_dmarc_lookup_error_mentioned() {
        let mut result = strong();
        result.dmarc = DmarcResult::failed("TXT lookup for _dmarc.example.com timed out");
        let recs = recommendations(&result);
        assert!(recs[0].message.contains("timed out"));
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(Priority::High.to_string(), "high");
        assert_eq!(Protocol::Dmarc.to_string(), "DMARC");
    }
}
