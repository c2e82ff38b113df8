//! DNS record lookups.
//!
//! This module provides the [`RecordLookup`] seam used by the DMARC checker and
//! the hash blocklist checker, and its implementation for the hickory Tokio
//! resolver. Lookup failures are returned as [`LookupFailure`] values so callers
//! can keep them as outcome data.
//!
//! [`LookupFailure`]: crate::error_handling::LookupFailure

mod extract;
mod records;

// Re-export public API
pub use extract::extract_dmarc_record;
pub use hickory_resolver::proto::rr::RecordType;
pub use records::{classify_resolve_error, RecordLookup};
