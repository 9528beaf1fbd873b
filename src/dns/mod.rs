//! DNS lookup port and its implementations.
//!
//! The rest of the engine only sees the [`DnsLookup`] trait:
//! `lookup(name, kind) -> list of strings`. Two implementations ship:
//! - [`HickoryLookup`] queries real DNS through `hickory-resolver`
//! - [`StaticLookup`] answers from an in-memory table (tests, demos)

mod extract;
mod records;
mod stub;

use futures::future::BoxFuture;
use strum_macros::{Display, EnumString};

use crate::error_handling::LookupError;

// Re-export public API
pub use extract::{find_dkim_key, find_dmarc_record, find_spf_record};
pub use records::HickoryLookup;
pub use stub::StaticLookup;

/// Record types the engine queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RecordKind {
    Txt,
    Mx,
}

/// Pluggable DNS lookup capability.
///
/// A name with no records of the requested kind must resolve to an empty
/// list, not an error. Errors are reserved for failed lookups (timeouts,
/// resolver failures).
pub trait DnsLookup: Send + Sync {
    fn lookup<'a>(
        &'a self,
        name: &'a str,
        kind: RecordKind,
    ) -> BoxFuture<'a, Result<Vec<String>, LookupError>>;
}
