//! Record lookups through the hickory resolver.

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::LookupFailure;

/// A source of DNS records.
///
/// Each call sends the query once and never retries; the production resolver
/// is built that way by `init_resolver`. Implementations must not panic on failure:
/// every failure is reported as a [`LookupFailure`].
#[allow(async_fn_in_trait)]
pub trait RecordLookup {
    /// Queries `name` for records of `record_type`, returning them as text.
    ///
    /// TXT records are returned with their character-strings concatenated; other
    /// types use their presentation format (e.g. `127.0.3.2` for A records).
    async fn lookup_records(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, LookupFailure>;
}

impl RecordLookup for TokioAsyncResolver {
    async fn lookup_records(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, LookupFailure> {
        match self.lookup(name, record_type).await {
            Ok(lookup) => Ok(lookup.iter().map(rdata_to_string).collect()),
            Err(e) => {
                log::debug!("{record_type} lookup for {name} failed: {e}");
                Err(classify_resolve_error(&e))
            }
        }
    }
}

/// Maps a resolver error onto the failure kinds reported to operators.
pub fn classify_resolve_error(err: &ResolveError) -> LookupFailure {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            if *response_code == ResponseCode::NXDomain {
                LookupFailure::NxDomain
            } else {
                LookupFailure::NoRecords
            }
        }
        ResolveErrorKind::Timeout => LookupFailure::Timeout,
        ResolveErrorKind::Proto(proto) if matches!(proto.kind(), ProtoErrorKind::Timeout) => {
            LookupFailure::Timeout
        }
        _ => LookupFailure::Resolver(err.to_string()),
    }
}

fn rdata_to_string(rdata: &RData) -> String {
    match rdata {
        // TXT records can be split across several character-strings
        RData::TXT(txt) => txt
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).to_string())
            .collect::<Vec<String>>()
            .join(""),
        other => other.to_string(),
    }
}
