//! Concurrent DMARC queries for one batch.

use futures::future::join_all;

use super::{DomainRecord, QueryOutcome};
use crate::config::DMARC_LABEL;
use crate::dns::{extract_dmarc_record, RecordLookup, RecordType};
use crate::error_handling::LookupFailure;

/// Returns the fully qualified name holding the DMARC policy of `domain`.
///
/// The trailing dot keeps resolver search domains from being appended.
pub fn dmarc_query_name(domain: &str) -> String {
    format!("{DMARC_LABEL}.{}.", domain.trim_end_matches('.'))
}

/// Queries `_dmarc.<domain>` TXT for every record of `batch` concurrently.
///
/// All lookups are started together and awaited together: the function returns
/// only once every lookup has settled. Outcomes are in `batch` order. A failed
/// lookup becomes a `false` outcome and has no effect on its siblings.
pub async fn query_batch<R: RecordLookup>(
    batch: &[DomainRecord],
    resolver: &R,
) -> Vec<QueryOutcome> {
    let lookups = batch.iter().map(|record| async move {
        let name = dmarc_query_name(&record.domain);
        match resolver.lookup_records(&name, RecordType::TXT).await {
            Ok(txt) if !txt.is_empty() => {
                if let Some(policy) = extract_dmarc_record(&txt) {
                    log::debug!("{}: {}", record.domain, policy);
                }
                QueryOutcome::found(record)
            }
            // An empty answer counts as no record
            Ok(_) => QueryOutcome::missing(record, LookupFailure::NoRecords),
            Err(failure) => QueryOutcome::missing(record, failure),
        }
    });
    join_all(lookups).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dmarc_query_name() {
        assert_eq!(dmarc_query_name("example.com"), "_dmarc.example.com.");
        assert_eq!(dmarc_query_name("example.com."), "_dmarc.example.com.");
    }
}
