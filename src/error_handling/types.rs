//! Error type definitions.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Errors reading an input file. Always fatal, raised before any output.
#[derive(Error, Debug)]
pub enum InputError {
    /// The CSV input could not be opened or parsed.
    #[error("Failed to read input file {}: {source}", .path.display())]
    Csv {
        /// Input file path
        path: PathBuf,
        /// Underlying reader error
        #[source]
        source: csv::Error,
    },

    /// A data row does not carry both `companyId` and `domain`.
    #[error("Input row on line {line} has {found} column(s), expected at least 2 (companyId, domain)")]
    MissingColumn {
        /// 1-based line number in the input file
        line: u64,
        /// Number of columns present
        found: usize,
    },

    /// A text report could not be read.
    #[error("Failed to read report {}: {source}", .path.display())]
    Report {
        /// Report file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors writing to an output sink. Always fatal.
#[derive(Error, Debug)]
pub enum OutputError {
    /// The output file (or its parent directory) could not be created or opened.
    #[error("Failed to open output file {}: {source}", .path.display())]
    Open {
        /// Output file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A row could not be written.
    #[error("Failed to write output row: {0}")]
    Write(#[from] csv::Error),

    /// A written row could not be flushed.
    #[error("Failed to flush output: {0}")]
    Flush(#[from] std::io::Error),
}

/// Why a single DNS query did not produce records.
///
/// These are outcome data, not program errors: the caller logs them and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// The queried name does not exist.
    #[error("NXDOMAIN")]
    NxDomain,

    /// The name exists but has no record of the requested type.
    #[error("no records found")]
    NoRecords,

    /// The resolver gave up waiting for an answer.
    #[error("timed out")]
    Timeout,

    /// Any other resolver, protocol or network failure.
    #[error("resolver error: {0}")]
    Resolver(String),
}

/// Errors raised while exporting leads from the CRM API.
#[derive(Error, Debug)]
pub enum LeadsError {
    /// Transport failure or undecodable response body.
    #[error("CRM API request failed: {0}")]
    Http(#[from] ReqwestError),

    /// Non-success HTTP status.
    #[error("CRM API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body (truncated)
        body: String,
    },

    /// The API answered with an `error` member.
    #[error("CRM API error: {0}")]
    Api(String),

    /// The response carried neither `result` nor `error`.
    #[error("CRM API response has no result")]
    MissingResult,
}
