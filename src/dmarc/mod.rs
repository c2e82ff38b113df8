//! Bulk DMARC checker.
//!
//! Reads `companyId,domain` rows, looks up `_dmarc.<domain>` TXT records in
//! batches of concurrent queries and appends one `TRUE`/`FALSE` row per domain
//! to the output file.
//!
//! Batches run strictly one after another: every query of a batch has settled
//! and every row of the batch has been written before the next batch starts.
//! Any lookup failure (NXDOMAIN, no record, timeout, network error) is recorded
//! as `FALSE` and never aborts the run; only input and output failures do.

mod batch;
mod executor;
mod input;
mod writer;

use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::DmarcConfig;
use crate::dns::RecordLookup;
use crate::error_handling::{LookupFailure, OutputError};
use crate::initialization::init_resolver;

// Re-export public API
pub use batch::{batches, Batches};
pub use executor::{dmarc_query_name, query_batch};
pub use input::read_domain_records;
pub use writer::ResultWriter;

/// One row of the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    /// Opaque company identifier (input column 0)
    pub company_id: String,
    /// Domain to check (input column 1)
    pub domain: String,
}

impl DomainRecord {
    /// Builds a record from its two columns.
    pub fn new(company_id: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            domain: domain.into(),
        }
    }
}

/// The verdict for one [`DomainRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    /// Company identifier copied from the input
    pub company_id: String,
    /// Domain copied from the input
    pub domain: String,
    /// Whether `_dmarc.<domain>` returned at least one TXT record
    pub has_dmarc: bool,
    /// Why the lookup produced nothing; only shown in the console
    pub failure: Option<LookupFailure>,
}

impl QueryOutcome {
    /// A domain whose DMARC lookup returned records.
    pub fn found(record: &DomainRecord) -> Self {
        Self {
            company_id: record.company_id.clone(),
            domain: record.domain.clone(),
            has_dmarc: true,
            failure: None,
        }
    }

    /// A domain whose DMARC lookup failed or came back empty.
    pub fn missing(record: &DomainRecord, failure: LookupFailure) -> Self {
        Self {
            company_id: record.company_id.clone(),
            domain: record.domain.clone(),
            has_dmarc: false,
            failure: Some(failure),
        }
    }

    /// `"TRUE"` or `"FALSE"`, as written to the output file.
    pub fn verdict(&self) -> &'static str {
        if self.has_dmarc {
            "TRUE"
        } else {
            "FALSE"
        }
    }
}

/// Summary of a DMARC run.
#[derive(Debug, Clone, PartialEq)]
pub struct DmarcReport {
    /// Number of domains read (and rows written)
    pub total_domains: usize,
    /// Rows written as `TRUE`
    pub with_dmarc: usize,
    /// Rows written as `FALSE`
    pub without_dmarc: usize,
    /// Number of batches processed
    pub batches: usize,
    /// Output file the rows were appended to
    pub output: PathBuf,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Checks `records` batch by batch and writes one row per record.
///
/// This is the resolver- and sink-agnostic core of [`run_dmarc_check`]: no
/// lookup of a batch is started before the previous batch is fully written.
///
/// # Errors
///
/// Returns an `OutputError` as soon as a row cannot be written. Rows written
/// before the failure stay in the sink.
pub async fn check_domains<R, W>(
    records: Vec<DomainRecord>,
    batch_limit: NonZeroUsize,
    resolver: &R,
    writer: &mut ResultWriter<W>,
) -> Result<DmarcReport, OutputError>
where
    R: RecordLookup,
    W: Write,
{
    let start_time = Instant::now();
    let total_domains = records.len();
    let mut report = DmarcReport {
        total_domains,
        with_dmarc: 0,
        without_dmarc: 0,
        batches: 0,
        output: PathBuf::new(),
        elapsed_seconds: 0.0,
    };

    for batch in batches(records, batch_limit) {
        report.batches += 1;
        debug!(
            "Batch {}: querying {} domain(s)",
            report.batches,
            batch.len()
        );

        let outcomes = query_batch(&batch, resolver).await;
        for outcome in &outcomes {
            writer.write_outcome(outcome)?;
            if outcome.has_dmarc {
                report.with_dmarc += 1;
            } else {
                report.without_dmarc += 1;
            }
        }

        log_progress(start_time, report.with_dmarc + report.without_dmarc, total_domains);
    }

    report.elapsed_seconds = start_time.elapsed().as_secs_f64();
    Ok(report)
}

/// Runs the DMARC check described by `config`.
///
/// Order of work: validate the configuration, read the whole input, open the
/// output, build the resolver, then query and write batch by batch.
///
/// # Errors
///
/// Fails on an invalid configuration, an unreadable or malformed input file,
/// an output file that cannot be opened or written, or a resolver that cannot
/// be built. Individual lookup failures are never errors.
///
/// # Example
///
/// ```no_run
/// use crmsec::{run_dmarc_check, DmarcConfig};
/// use std::path::PathBuf;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = DmarcConfig {
///     input: PathBuf::from("domains.csv"),
///     ..Default::default()
/// };
/// let report = run_dmarc_check(config).await?;
/// println!("{} of {} domains publish DMARC", report.with_dmarc, report.total_domains);
/// # Ok(())
/// # }
/// ```
pub async fn run_dmarc_check(config: DmarcConfig) -> Result<DmarcReport> {
    config.validate()?;
    let batch_limit = NonZeroUsize::new(config.batch_limit)
        .context("Batch limit must be greater than 0")?;

    let records = read_domain_records(&config.input).context("Failed to load domain list")?;
    info!(
        "Loaded {} domain(s) from {}",
        records.len(),
        config.input.display()
    );

    let mut writer = ResultWriter::append_to(&config.output)?;

    if records.is_empty() {
        info!("No domains to check");
        return Ok(DmarcReport {
            total_domains: 0,
            with_dmarc: 0,
            without_dmarc: 0,
            batches: 0,
            output: config.output,
            elapsed_seconds: 0.0,
        });
    }

    let resolver = init_resolver(&config.nameservers, config.dns_timeout_secs)
        .context("Failed to initialize DNS resolver")?;

    let mut report = check_domains(records, batch_limit, &resolver, &mut writer).await?;
    report.output = config.output;

    info!(
        "DMARC check finished: {} domain(s), {} with DMARC, {} without, {} batch(es)",
        report.total_domains, report.with_dmarc, report.without_dmarc, report.batches
    );
    Ok(report)
}

fn log_progress(start_time: Instant, completed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {}/{} domains in {:.2} seconds (~{:.2} domains/sec)",
        completed, total, elapsed_secs, rate
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_strings() {
        let record = DomainRecord::new("1", "example.com");
        assert_eq!(QueryOutcome::found(&record).verdict(), "TRUE");
        assert_eq!(
            QueryOutcome::missing(&record, LookupFailure::Timeout).verdict(),
            "FALSE"
        );
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_config_before_touching_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("results.csv");
        let config = DmarcConfig {
            input: dir.path().join("absent.csv"),
            output: output.clone(),
            batch_limit: 0,
            ..Default::default()
        };
        let err = run_dmarc_check(config).await.unwrap_err();
        assert!(err.to_string().contains("batch_limit"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_run_with_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out").join("results.csv");
        let config = DmarcConfig {
            input: dir.path().join("absent.csv"),
            output: output.clone(),
            ..Default::default()
        };
        let err = run_dmarc_check(config).await.unwrap_err();
        assert!(format!("{err:#}").contains("absent.csv"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_run_with_header_only_input_issues_no_queries() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("domains.csv");
        std::fs::write(&input, "companyid,domain\n").unwrap();
        let output = dir.path().join("results.csv");
        // Unroutable nameserver: any query would time out, none should be sent
        let config = DmarcConfig {
            input,
            output: output.clone(),
            nameservers: vec!["192.0.2.1".parse().unwrap()],
            ..Default::default()
        };
        let report = run_dmarc_check(config).await.unwrap();
        assert_eq!(report.total_domains, 0);
        assert_eq!(report.batches, 0);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
    }
}
