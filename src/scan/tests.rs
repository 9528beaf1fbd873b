//! Scan orchestrator tests.

use super::*;
use crate::dns::{RecordKind, StaticLookup};
use crate::mode::{DomainChecker, SimulationChecker};
use crate::models::Status;
use futures::future::BoxFuture;
use std::sync::atomic::AtomicUsize;

/// Checker that records call counts and peak concurrency.
#[derive(Default)]
struct CountingChecker {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay_ms: u64,
    fail_domain: Option<String>,
    panic_domain: Option<String>,
}

impl CountingChecker {
    fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Default::default()
        }
    }
}

impl DomainChecker for CountingChecker {
    fn mode(&self) -> CheckMode {
        CheckMode::Offline
    }

    fn check_domain<'a>(
        &'a self,
        domain: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<DomainCheckResult>> {
        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            // Shorter names finish later so completion order differs from input order
            let delay = self.delay_ms * (20u64.saturating_sub(domain.len() as u64)).max(1);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.panic_domain.as_deref() == Some(domain) {
                panic!("checker blew up on {domain}");
            }
            if self.fail_domain.as_deref() == Some(domain) {
                anyhow::bail!("upstream refused {domain}");
            }
            let mut result = DomainCheckResult::failed(domain, "unused");
            result.error = None;
            result.security_score = 42;
            Ok(result)
        }
        .boxed()
    }

    fn check_availability(&self) -> BoxFuture<'_, bool> {
        async { true }.boxed()
    }
}

fn client_with(checker: Arc<dyn DomainChecker>) -> ScanClient {
    let simulation: Arc<dyn DomainChecker> =
        Arc::new(SimulationChecker::seeded(3, Duration::ZERO));
    let checkers = ModeCheckers {
        api: Arc::clone(&simulation),
        web: Arc::clone(&simulation),
        offline: checker,
        simulation,
    };
    let client = ScanClient::new(
        checkers,
        Arc::new(ResultCache::default()),
        Arc::new(ProcessingStats::new()),
        CheckMode::Offline,
    );
    client.set_delay(0);
    client
}

fn offline_client(lookup: Arc<StaticLookup>) -> ScanClient {
    let config = Config {
        mode: crate::config::ModeOption::Offline,
        delay_ms: 0,
        simulation_delay_ms: 0,
        simulation_seed: Some(11),
        ..Default::default()
    };
    ScanClient::from_config(lookup, &config)
}

fn well_configured(lookup: StaticLookup, domain: &str) -> StaticLookup {
    lookup
        .with_txt(
            &format!("_dmarc.{domain}"),
            ["v=DMARC1; p=reject; rua=mailto:a@b.com; pct=100"],
        )
        .with_txt(domain, ["v=spf1 include:_spf.example.net -all"])
        .with_txt(&format!("google._domainkey.{domain}"), ["v=DKIM1; k=rsa; p=abc"])
        .with_txt(&format!("k1._domainkey.{domain}"), ["v=DKIM1; k=rsa; p=def"])
        .with_mx(domain, [format!("mx.{domain}")])
}

#[tokio::test]
async fn test_mixed_batch_preserves_order_and_flags_invalid() {
    let client = client_with(Arc::new(SimulationChecker::seeded(5, Duration::ZERO)));
    let results = client
        .check_domains(&["example.com", "not a domain", "gmail.com"], None)
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].domain, "example.com");
    assert_eq!(results[1].domain, "not a domain");
    assert_eq!(results[2].domain, "gmail.com");
    assert_eq!(results[1].error.as_deref(), Some("invalid domain format"));
    assert_eq!(results[1].security_score, 0);
    assert!(results[0].error.is_none());
    assert!(results[2].error.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_output_order_independent_of_completion_order() {
    let checker = Arc::new(CountingChecker::with_delay(2));
    let client = client_with(checker.clone());
    client.set_concurrent_requests(4);
    let input = vec![
        "a.io".to_string(),
        "much-longer-name.com".to_string(),
        "bb.io".to_string(),
        "medium-name.org".to_string(),
        "c.co".to_string(),
    ];
    let results = client.check_domains(&input, None).await.unwrap();
    let domains: Vec<&str> = results.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(
        domains,
        vec!["a.io", "much-longer-name.com", "bb.io", "medium-name.org", "c.co"]
    );
}

#[tokio::test]
async fn test_input_normalized_and_deduplicated() {
    let checker = Arc::new(CountingChecker::default());
    let client = client_with(checker.clone());
    let results = client
        .check_domains(&[" Example.COM", "example.com", "", "other.org", "bad domain", "bad domain"], None)
        .await
        .unwrap();
    let domains: Vec<&str> = results.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(domains, vec!["example.com", "other.org", "bad domain"]);
    assert_eq!(checker.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_progress_counts_total_including_invalid() {
    let client = client_with(Arc::new(CountingChecker::default()));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    let callback: ProgressCallback = Arc::new(move |processed, total, result| {
        seen_clone
            .lock()
            .unwrap()
            .push((processed, total, result.domain.clone()));
    });

    client
        .check_domains(&["a.com", "not valid", "b.com", "c.com"], Some(callback))
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 4);
    // Invalid entries are reported before any worker starts
    assert_eq!(seen[0], (1, 4, "not valid".to_string()));
    let processed: Vec<usize> = seen.iter().map(|(p, _, _)| *p).collect();
    assert_eq!(processed, vec![1, 2, 3, 4]);
    assert!(seen.iter().all(|(_, total, _)| *total == 4));
}

#[tokio::test]
async fn test_progress_callback_panic_is_swallowed() {
    let client = client_with(Arc::new(CountingChecker::default()));
    let callback: ProgressCallback = Arc::new(|processed, _, _| {
        if processed == 1 {
            panic!("UI exploded");
        }
    });
    let results = client
        .check_domains(&["a.com", "b.com", "c.com"], Some(callback))
        .await
        .unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(
        client
            .stats()
            .get_error_count(ErrorType::ProgressCallbackError),
        1
    );
    assert!(!client.scan_status().is_scanning());
}

#[tokio::test]
async fn test_checker_failure_becomes_error_result() {
    let checker = Arc::new(CountingChecker {
        fail_domain: Some("broken.com".to_string()),
        ..Default::default()
    });
    let client = client_with(checker.clone());
    let results = client
        .check_domains(&["ok.com", "broken.com"], None)
        .await
        .unwrap();
    assert!(results[0].error.is_none());
    let failed = &results[1];
    assert!(failed.error.as_deref().unwrap().contains("upstream refused"));
    assert_eq!(failed.dmarc.status, Status::Error);
    assert_eq!(failed.security_score, 0);

    // Failures are not cached: a retry reaches the checker again
    let before = checker.calls.load(Ordering::SeqCst);
    client.check_domain("broken.com").await;
    assert_eq!(checker.calls.load(Ordering::SeqCst), before + 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_checker_panic_confined_to_its_domain() {
    let checker = Arc::new(CountingChecker {
        panic_domain: Some("boom.com".to_string()),
        ..Default::default()
    });
    let client = client_with(checker);
    let results = client
        .check_domains(&["boom.com", "fine.com"], None)
        .await
        .unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].error.as_deref().unwrap().contains("panicked"));
    assert!(results[1].error.is_none());
}

#[tokio::test]
async fn test_no_valid_domains_rejected_without_state_change() {
    let client = client_with(Arc::new(CountingChecker::default()));
    let called = Arc::new(AtomicUsize::new(0));
    let called_clone = Arc::clone(&called);
    let callback: ProgressCallback = Arc::new(move |_, _, _| {
        called_clone.fetch_add(1, Ordering::SeqCst);
    });
    let err = client
        .check_domains(&["not a domain", "also bad"], Some(callback))
        .await
        .unwrap_err();
    assert_eq!(err, ScanError::NoValidDomains);
    assert_eq!(called.load(Ordering::SeqCst), 0);
    assert_eq!(client.scan_status().state, ScanState::default());

    let empty: [&str; 0] = [];
    assert_eq!(
        client.check_domains(&empty, None).await.unwrap_err(),
        ScanError::NoValidDomains
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_scan_rejected_without_disturbing_first() {
    let checker = Arc::new(CountingChecker::with_delay(10));
    let client = client_with(checker);
    client.set_concurrent_requests(2);

    let domains: Vec<String> = (0..8).map(|i| format!("host{i}.example.com")).collect();
    let first = {
        let client = client.clone();
        let domains = domains.clone();
        tokio::spawn(async move { client.check_domains(&domains, None).await })
    };

    while !client.scan_status().is_scanning() {
        tokio::task::yield_now().await;
    }
    let second = client.check_domains(&["other.com"], None).await;
    assert_eq!(second.unwrap_err(), ScanError::AlreadyScanning);

    let results = first.await.unwrap().unwrap();
    assert_eq!(results.len(), 8);
    let names: Vec<&str> = results.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(names, domains.iter().map(String::as_str).collect::<Vec<_>>());
    assert!(!client.scan_status().is_scanning());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_stop_scan_mid_batch() {
    let lookup = Arc::new(StaticLookup::new().with_delay(Duration::from_millis(2)));
    let client = offline_client(Arc::clone(&lookup));
    client.set_concurrent_requests(3);

    let domains: Vec<String> = (0..100).map(|i| format!("d{i}.example.com")).collect();
    let stopper = client.clone();
    let callback: ProgressCallback = Arc::new(move |processed, _, _| {
        if processed == 10 {
            stopper.stop_scan();
        }
    });

    let results = client.check_domains(&domains, Some(callback)).await.unwrap();

    assert!(results.len() < 100, "stop should prevent draining the queue");
    assert!(results.len() >= 10);
    let unique: HashSet<&str> = results.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(unique.len(), results.len());
    // Survivors keep their relative input order
    let positions: Vec<usize> = results
        .iter()
        .map(|r| domains.iter().position(|d| *d == r.domain).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    let status = client.scan_status();
    assert!(!status.is_scanning());
    assert!(status.state.should_stop);
}

#[tokio::test]
async fn test_stop_scan_without_scan_is_noop() {
    let client = client_with(Arc::new(CountingChecker::default()));
    assert!(!client.stop_scan());
    assert!(!client.scan_status().state.should_stop);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pool_never_exceeds_concurrent_requests() {
    let checker = Arc::new(CountingChecker::with_delay(1));
    let client = client_with(checker.clone());
    client.set_concurrent_requests(3);
    let domains: Vec<String> = (0..12).map(|i| format!("n{i}.example.org")).collect();
    client.check_domains(&domains, None).await.unwrap();
    let peak = checker.max_in_flight.load(Ordering::SeqCst);
    assert!(peak <= 3, "peak concurrency {peak} exceeded pool size");
    assert_eq!(checker.calls.load(Ordering::SeqCst), 12);
}

#[test]
fn test_pool_size() {
    assert_eq!(pool_size(3, 100), 3);
    assert_eq!(pool_size(3, 2), 2);
    assert_eq!(pool_size(5, 1), 1);
}

#[test]
fn test_set_concurrent_requests_clamps() {
    let client = client_with(Arc::new(CountingChecker::default()));
    client.set_concurrent_requests(0);
    assert_eq!(client.concurrent_requests(), 1);
    client.set_concurrent_requests(10_000);
    assert_eq!(client.concurrent_requests(), MAX_CONCURRENT_REQUESTS);
    client.set_concurrent_requests(5);
    assert_eq!(client.concurrent_requests(), 5);
}

#[tokio::test]
async fn test_cached_domain_not_looked_up_again() {
    let lookup = Arc::new(well_configured(StaticLookup::new(), "x.com"));
    let client = offline_client(Arc::clone(&lookup));

    let first = client.check_domain("x.com").await;
    let calls_after_first = lookup.call_count();
    assert!(calls_after_first > 0);
    assert_eq!(first.dmarc.status, Status::Ok);
    assert_eq!(first.dmarc.policy, "reject");

    let second = client.check_domain("X.com ").await;
    assert_eq!(first, second);
    assert_eq!(lookup.call_count(), calls_after_first);
    assert_eq!(client.stats().get_info_count(InfoType::CacheHit), 1);
}

#[tokio::test]
async fn test_batch_uses_cache_and_clear_cache_forces_lookup() {
    let lookup = Arc::new(well_configured(StaticLookup::new(), "x.com"));
    let client = offline_client(Arc::clone(&lookup));

    client.check_domains(&["x.com"], None).await.unwrap();
    let calls = lookup.call_count();
    client.check_domains(&["x.com"], None).await.unwrap();
    assert_eq!(lookup.call_count(), calls);

    client.clear_cache();
    client.check_domains(&["x.com"], None).await.unwrap();
    assert_eq!(lookup.call_count(), calls * 2);
}

#[tokio::test]
async fn test_delay_follows_last_check_but_not_cache_hits() {
    let checker = Arc::new(CountingChecker::default());
    let client = client_with(checker.clone());
    client.set_concurrent_requests(1);
    client.set_delay(200);

    let started = std::time::Instant::now();
    client.check_domains(&["a.com"], None).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(200));

    let started = std::time::Instant::now();
    let results = client.check_domains(&["a.com"], None).await.unwrap();
    assert!(started.elapsed() < Duration::from_millis(100));
    assert_eq!(results[0].security_score, 42);
    assert_eq!(checker.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_disabled_cache_always_checks() {
    let checker = Arc::new(CountingChecker::default());
    let client = client_with(checker.clone());
    client.set_cache_enabled(false);
    client.check_domain("a.com").await;
    client.check_domain("a.com").await;
    assert_eq!(checker.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_check_domain_invalid_never_reaches_lookup() {
    let lookup = Arc::new(StaticLookup::new());
    let client = offline_client(Arc::clone(&lookup));
    let result = client.check_domain("not a domain").await;
    assert_eq!(result.error.as_deref(), Some("invalid domain format"));
    assert_eq!(lookup.call_count(), 0);
}

#[tokio::test]
async fn test_offline_scan_end_to_end() {
    let lookup = StaticLookup::new()
        .with_txt("_dmarc.weak.com", ["v=DMARC1; p=reject; pct=50; rua=mailto:r@weak.com"])
        .with_txt("weak.com", ["v=spf1 +all"])
        .with_failure("_dmarc.flaky.com", RecordKind::Txt)
        .with_txt("flaky.com", ["v=spf1 -all"]);
    let lookup = Arc::new(well_configured(lookup, "strong.com"));
    let client = offline_client(lookup);

    let results = client
        .check_domains(&["strong.com", "weak.com", "flaky.com"], None)
        .await
        .unwrap();

    assert_eq!(results[0].security_score, 100);
    assert_eq!(results[0].mx, vec!["mx.strong.com".to_string()]);

    assert_eq!(results[1].dmarc.status, Status::Warning);
    assert_eq!(results[1].dmarc.policy, "reject");
    assert_eq!(results[1].spf.status, Status::Warning);
    assert_eq!(results[1].dkim.status, Status::Error);
    assert_eq!(results[1].security_score, 20 + 15);

    assert_eq!(results[2].dmarc.status, Status::Error);
    assert!(results[2].dmarc.error.is_some());
    assert_eq!(results[2].spf.status, Status::Ok);
    assert!(results[2].error.is_none());
}

#[tokio::test]
async fn test_set_mode_notifies_and_keeps_cache() {
    let client = client_with(Arc::new(CountingChecker::default()));
    let mut events = client.subscribe_mode_changes();
    client.check_domain("a.com").await;

    client.set_mode(CheckMode::Simulation);
    assert_eq!(client.mode(), CheckMode::Simulation);
    assert_eq!(events.recv().await.unwrap(), CheckMode::Simulation);
    assert_eq!(client.cache().len(), 1);
    assert_eq!(client.scan_status().mode, CheckMode::Simulation);
}

#[tokio::test]
async fn test_select_best_available_prefers_api() {
    let config = Config {
        api_endpoint: Some("https://scan.example".into()),
        api_key: Some("k".into()),
        web_endpoint: Some("https://tool.example".into()),
        delay_ms: 0,
        simulation_delay_ms: 0,
        ..Default::default()
    };
    let client = ScanClient::from_config(Arc::new(StaticLookup::new()), &config);
    let mut events = client.subscribe_mode_changes();
    assert_eq!(client.select_best_available_mode().await, CheckMode::Api);
    assert_eq!(events.recv().await.unwrap(), CheckMode::Api);
}

#[tokio::test]
async fn test_select_best_available_web_then_offline() {
    let web_config = Config {
        web_endpoint: Some("https://tool.example".into()),
        ..Default::default()
    };
    let client = ScanClient::from_config(Arc::new(StaticLookup::new()), &web_config);
    assert_eq!(client.select_best_available_mode().await, CheckMode::Web);

    let lookup = StaticLookup::new().with_txt("google.com", ["v=spf1 include:_spf.google.com ~all"]);
    let client = ScanClient::from_config(Arc::new(lookup), &Config::default());
    assert_eq!(client.select_best_available_mode().await, CheckMode::Offline);
}

#[tokio::test]
async fn test_select_best_available_falls_back_to_simulation() {
    let lookup = StaticLookup::new().with_failure("google.com", RecordKind::Txt);
    let client = ScanClient::from_config(Arc::new(lookup), &Config::default());
    client.set_mode(CheckMode::Offline);
    assert_eq!(
        client.select_best_available_mode().await,
        CheckMode::Simulation
    );
    assert_eq!(client.mode(), CheckMode::Simulation);
}
