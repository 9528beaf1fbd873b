//! Remote check modes (`api`, `web`).
//!
//! Neither remote integration is wired to a real service; once selected,
//! both answer through the simulation checker.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use super::{CheckMode, DomainChecker, SimulationChecker};
use crate::models::DomainCheckResult;

#[derive(Debug)]
pub struct RemoteChecker {
    mode: CheckMode,
    endpoint: Option<String>,
    api_key: Option<String>,
    fallback: Arc<SimulationChecker>,
}

impl RemoteChecker {
    /// Authenticated scanning service. Available once both an endpoint and
    /// a key are configured.
    pub fn api(
        endpoint: Option<String>,
        api_key: Option<String>,
        fallback: Arc<SimulationChecker>,
    ) -> Self {
        Self {
            mode: CheckMode::Api,
            endpoint,
            api_key,
            fallback,
        }
    }

    /// Third-party web tool. Available once an endpoint is configured.
    pub fn web(endpoint: Option<String>, fallback: Arc<SimulationChecker>) -> Self {
        Self {
            mode: CheckMode::Web,
            endpoint,
            api_key: None,
            fallback,
        }
    }

    fn is_configured(&self) -> bool {
        let has_endpoint = self.endpoint.as_deref().is_some_and(|e| !e.trim().is_empty());
        match self.mode {
            CheckMode::Api => {
                has_endpoint && self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
            }
            _ => has_endpoint,
        }
    }
}

impl DomainChecker for RemoteChecker {
    fn mode(&self) -> CheckMode {
        self.mode
    }

    fn check_domain<'a>(
        &'a self,
        domain: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<DomainCheckResult>> {
        async move {
            log::debug!(
                "{} mode has no live integration, simulating {domain}",
                self.mode
            );
            self.fallback.check_domain(domain).await
        }
        .boxed()
    }

    fn check_availability(&self) -> BoxFuture<'_, bool> {
        let available = self.is_configured();
        async move { available }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> Arc<SimulationChecker> {
        Arc::new(SimulationChecker::seeded(7, std::time::Duration::ZERO))
    }

    #[tokio::test]
    async fn test_api_requires_endpoint_and_key() {
        let none = RemoteChecker::api(None, None, fallback());
        assert!(!none.check_availability().await);

        let no_key = RemoteChecker::api(Some("https://scan.example".into()), None, fallback());
        assert!(!no_key.check_availability().await);

        let blank_key = RemoteChecker::api(
            Some("https://scan.example".into()),
            Some("  ".into()),
            fallback(),
        );
        assert!(!blank_key.check_availability().await);

        let ready = RemoteChecker::api(
            Some("https://scan.example".into()),
            Some("secret".into()),
            fallback(),
        );
        assert!(ready.check_availability().await);
    }

    #[tokio::test]
    async fn test_web_requires_endpoint() {
        assert!(!RemoteChecker::web(None, fallback()).check_availability().await);
        assert!(
            RemoteChecker::web(Some("https://tool.example".into()), fallback())
                .check_availability()
                .await
        );
    }

    #[tokio::test]
    async fn test_remote_check_falls_back_to_simulation() {
        let checker = RemoteChecker::web(None, fallback());
        assert_eq!(checker.mode(), CheckMode::Web);
        let result = checker.check_domain("example.com").await.unwrap();
        assert_eq!(result.domain, "example.com");
        assert_eq!(
            result.mx,
            vec!["mx1.example.com".to_string(), "mx2.example.com".to_string()]
        );
    }
}
