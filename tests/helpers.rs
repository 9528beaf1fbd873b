// Shared DNS fixtures for the integration tests.

use std::sync::Arc;

use domain_auth_scan::{Config, ModeOption, ScanClient, StaticLookup};

/// Adds a fully hardened domain: DMARC reject with reporting, SPF -all,
/// two DKIM selectors and one MX host.
#[allow(dead_code)]
pub fn hardened(lookup: StaticLookup, domain: &str) -> StaticLookup {
    lookup
        .with_txt(
            &format!("_dmarc.{domain}"),
            [format!("v=DMARC1; p=reject; rua=mailto:dmarc@{domain}; pct=100")],
        )
        .with_txt(
            domain,
            [
                "google-site-verification=abc".to_string(),
                "v=spf1 include:_spf.google.com -all".to_string(),
            ],
        )
        .with_txt(&format!("google._domainkey.{domain}"), ["v=DKIM1; k=rsa; p=MIIB"])
        .with_txt(&format!("selector1._domainkey.{domain}"), ["k=rsa; p=MIIC"])
        .with_mx(domain, [format!("mx.{domain}")])
}

/// Config for a fast offline client with no pacing.
#[allow(dead_code)]
pub fn offline_config() -> Config {
    Config {
        mode: ModeOption::Offline,
        delay_ms: 0,
        simulation_delay_ms: 0,
        simulation_seed: Some(7),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn offline_client(lookup: Arc<StaticLookup>) -> ScanClient {
    ScanClient::from_config(lookup, &offline_config())
}
