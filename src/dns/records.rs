//! DNS record queries (TXT, MX) backed by `hickory-resolver`.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use hickory_resolver::error::ResolveError;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use super::{DnsLookup, RecordKind};
use crate::error_handling::LookupError;

/// [`DnsLookup`] implementation over a shared hickory resolver.
#[derive(Clone)]
pub struct HickoryLookup {
    resolver: Arc<TokioAsyncResolver>,
    timeout: Duration,
}

impl std::fmt::Debug for HickoryLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HickoryLookup")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HickoryLookup {
    pub fn new(resolver: Arc<TokioAsyncResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    async fn query(&self, name: &str, kind: RecordKind) -> Result<Vec<String>, LookupError> {
        let record_type = match kind {
            RecordKind::Txt => RecordType::TXT,
            RecordKind::Mx => RecordType::MX,
        };
        let lookup = match tokio::time::timeout(
            self.timeout,
            self.resolver.lookup(name, record_type),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                log::warn!("{kind} record lookup timed out for {name}");
                return Err(LookupError::Timeout {
                    name: name.to_string(),
                    kind,
                });
            }
        };

        match lookup {
            Ok(lookup) => Ok(match kind {
                RecordKind::Txt => txt_strings(lookup.iter()),
                RecordKind::Mx => mx_hosts(lookup.iter()),
            }),
            Err(e) => classify_failure(name, kind, e),
        }
    }
}

impl DnsLookup for HickoryLookup {
    fn lookup<'a>(
        &'a self,
        name: &'a str,
        kind: RecordKind,
    ) -> BoxFuture<'a, Result<Vec<String>, LookupError>> {
        self.query(name, kind).boxed()
    }
}

/// TXT records can hold multiple character strings; they are joined.
fn txt_strings<'a>(rdata: impl Iterator<Item = &'a RData>) -> Vec<String> {
    rdata
        .filter_map(|rdata| {
            if let RData::TXT(txt) = rdata {
                Some(
                    txt.iter()
                        .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                        .collect::<Vec<String>>()
                        .join(""),
                )
            } else {
                None
            }
        })
        .collect()
}

/// Exchange hostnames sorted by preference (lower = higher priority).
fn mx_hosts<'a>(rdata: impl Iterator<Item = &'a RData>) -> Vec<String> {
    let mut mx_records: Vec<(u16, String)> = rdata
        .filter_map(|rdata| {
            if let RData::MX(mx) = rdata {
                let host = mx.exchange().to_utf8();
                Some((mx.preference(), host.trim_end_matches('.').to_string()))
            } else {
                None
            }
        })
        .collect();
    mx_records.sort_by_key(|(priority, _)| *priority);
    mx_records.into_iter().map(|(_, host)| host).collect()
}

fn classify_failure(
    name: &str,
    kind: RecordKind,
    e: ResolveError,
) -> Result<Vec<String>, LookupError> {
    let error_msg = e.to_string();
    // "no records found" is expected for names without records of this type
    if error_msg.contains("no records found") || error_msg.contains("NXDomain") {
        return Ok(Vec::new());
    }
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        log::warn!("{kind} record lookup timed out for {name}: {e}");
        return Err(LookupError::Timeout {
            name: name.to_string(),
            kind,
        });
    }
    log::warn!("Failed to lookup {kind} records for {name}: {e}");
    Err(LookupError::Resolver {
        name: name.to_string(),
        kind,
        message: error_msg,
    })
}
