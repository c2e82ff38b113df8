//! Error types.
//!
//! Errors fall into three groups:
//! - **Fatal input/output errors**: unreadable input, unwritable output. They
//!   abort the run.
//! - **Per-lookup failures**: captured as data ([`LookupFailure`]) and never
//!   propagated past the domain or hash they belong to.
//! - **Initialization errors**: logger, resolver or HTTP client setup.

mod types;

// Re-export public API
pub use types::{InitializationError, InputError, LeadsError, LookupFailure, OutputError};
