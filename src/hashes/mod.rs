//! Hash blocklist checker.
//!
//! Extracts hash tokens from a text report and looks each one up in a
//! reputation DNS list. A listed hash resolves to one or more A records
//! (`127.0.x.y` return codes). Error return codes in `127.255.255.0/24` are
//! lookup failures, and like any other failure mean not listed.

mod parse;

use std::io::{self, Write};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::*;
use csv::Writer;
use log::info;

use crate::config::{HashesConfig, HBL_ERROR_PREFIX, HBL_URL_LABEL};
use crate::dns::{RecordLookup, RecordType};
use crate::error_handling::{LookupFailure, OutputError};
use crate::initialization::init_resolver;

// Re-export public API
pub use parse::{parse_hash_report, read_hash_report, HashEntry};

/// Result of one blocklist lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashVerdict {
    /// URL the hash belongs to
    pub url: String,
    /// The hash token
    pub hash: String,
    /// Whether the list returned any answer
    pub listed: bool,
    /// Return codes from the list
    pub answers: Vec<String>,
    /// Why the lookup returned nothing, if it did not
    pub failure: Option<LookupFailure>,
}

/// Summary of a hash check.
#[derive(Debug, Clone, PartialEq)]
pub struct HashesReport {
    /// Hashes checked
    pub total_hashes: usize,
    /// Hashes found on the list
    pub listed: usize,
    /// CSV output path, if any
    pub output: Option<PathBuf>,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Builds the list query name `<hash>._url.<key>.<zone>.`.
///
/// The `_url` label is used verbatim for every hash.
pub fn blocklist_query_name(hash: &str, key: &str, zone: &str) -> String {
    format!("{hash}.{HBL_URL_LABEL}.{key}.{}.", zone.trim_matches('.'))
}

/// Looks up every entry, one after another, in report order.
pub async fn check_hashes<R: RecordLookup>(
    entries: &[HashEntry],
    key: &str,
    zone: &str,
    resolver: &R,
) -> Vec<HashVerdict> {
    let mut verdicts = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = blocklist_query_name(&entry.hash, key, zone);
        let (answers, failure) = match resolver.lookup_records(&name, RecordType::A).await {
            Ok(answers) if answers.is_empty() => (Vec::new(), Some(LookupFailure::NoRecords)),
            Ok(answers) if answers.iter().any(|a| is_error_code(a)) => {
                let failure = LookupFailure::Resolver(format!(
                    "blocklist returned error code {}",
                    answers.join(", ")
                ));
                (Vec::new(), Some(failure))
            }
            Ok(answers) => (answers, None),
            Err(failure) => (Vec::new(), Some(failure)),
        };
        let verdict = HashVerdict {
            url: entry.url.clone(),
            hash: entry.hash.clone(),
            listed: !answers.is_empty(),
            answers,
            failure,
        };
        log_verdict(&verdict);
        verdicts.push(verdict);
    }
    verdicts
}

/// Whether `answer` is one of the list's error return codes rather than a listing.
fn is_error_code(answer: &str) -> bool {
    answer
        .parse::<Ipv4Addr>()
        .is_ok_and(|ip| ip.octets()[..3] == HBL_ERROR_PREFIX)
}

fn log_verdict(verdict: &HashVerdict) {
    if verdict.listed {
        info!(
            " {} {} {} => {}",
            "[LISTED]".red().bold(),
            verdict.url,
            verdict.hash,
            verdict.answers.join(", ")
        );
    } else {
        let reason = verdict
            .failure
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        info!(
            " {} {} {} ({})",
            "[clean]".green(),
            verdict.url,
            verdict.hash,
            reason
        );
    }
}

/// Writes verdicts as CSV with a `url,hash,listed,answers` header.
///
/// # Errors
///
/// Returns an `OutputError` if a row cannot be written or flushed.
pub fn write_verdicts<W: Write>(inner: W, verdicts: &[HashVerdict]) -> Result<(), OutputError> {
    let mut writer = Writer::from_writer(inner);
    writer.write_record(["url", "hash", "listed", "answers"])?;
    for verdict in verdicts {
        let listed = if verdict.listed { "TRUE" } else { "FALSE" };
        let answers = verdict.answers.join(";");
        writer.write_record([
            verdict.url.as_str(),
            verdict.hash.as_str(),
            listed,
            answers.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Runs the hash check described by `config`.
///
/// # Errors
///
/// Fails on an invalid configuration, an unreadable report, a resolver that
/// cannot be built, or an output failure. Lookup failures are reported per
/// hash as "not listed".
pub async fn run_hash_check(config: HashesConfig) -> Result<HashesReport> {
    config.validate()?;
    let start_time = Instant::now();

    let entries = read_hash_report(&config.report).context("Failed to load hash report")?;
    info!("Found {} hash(es) in {}", entries.len(), config.report.display());

    let verdicts = if entries.is_empty() {
        Vec::new()
    } else {
        let resolver = init_resolver(&config.nameservers, config.dns_timeout_secs)
            .context("Failed to initialize DNS resolver")?;
        check_hashes(&entries, &config.key, &config.zone, &resolver).await
    };

    match &config.output {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|source| OutputError::Open {
                path: path.clone(),
                source,
            })?;
            write_verdicts(file, &verdicts)?;
            info!("Wrote {} verdict(s) to {}", verdicts.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            for verdict in &verdicts {
                writeln!(
                    stdout,
                    "{}\t{}\t{}",
                    verdict.url,
                    verdict.hash,
                    verdict.answers.join(",")
                )
                .map_err(OutputError::Flush)?;
            }
        }
    }

    Ok(HashesReport {
        total_hashes: verdicts.len(),
        listed: verdicts.iter().filter(|v| v.listed).count(),
        output: config.output,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}
