//! crmsec library: operational tooling for a CRM security team
//!
//! Three independent procedures:
//! - [`run_dmarc_check`]: bulk-check `_dmarc.<domain>` TXT records for a CSV
//!   list of domains, in concurrent batches, appending `TRUE`/`FALSE` rows
//! - [`run_lead_export`]: page through the CRM `getLeads` API and write leads
//!   as CSV
//! - [`run_hash_check`]: look up the hashes of a text report in a reputation
//!   DNS list
//!
//! # Example
//!
//! ```no_run
//! use crmsec::{run_dmarc_check, DmarcConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DmarcConfig {
//!     input: std::path::PathBuf::from("domains.csv"),
//!     batch_limit: 200,
//!     ..Default::default()
//! };
//!
//! let report = run_dmarc_check(config).await?;
//! println!("{} with DMARC, {} without", report.with_dmarc, report.without_dmarc);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

pub mod config;
pub mod dmarc;
pub mod dns;
pub mod error_handling;
pub mod hashes;
pub mod initialization;
pub mod leads;

// Re-export public API
pub use config::{DmarcConfig, HashesConfig, LeadsConfig, LogFormat, LogLevel};
pub use dmarc::{run_dmarc_check, DmarcReport};
pub use hashes::{run_hash_check, HashesReport};
pub use leads::{run_lead_export, LeadsReport};
