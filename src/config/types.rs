//! Configuration types.
//!
//! This module defines the enums shared with the CLI and the library
//! configuration structs for each subcommand. The structs can be constructed
//! programmatically without any CLI dependencies.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::ValueEnum;
use thiserror::Error;

use crate::config::constants::{
    BATCH_LIMIT, CRM_REQUEST_TIMEOUT_SECS, DEFAULT_CRM_ENDPOINT, DEFAULT_DMARC_INPUT,
    DEFAULT_DMARC_OUTPUT, DEFAULT_HASH_REPORT, DEFAULT_HBL_ZONE, LEADS_PAGE_DELAY_MS,
    LEADS_PAGE_LIMIT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// A configuration value that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field (matches the CLI flag without dashes)
    pub field: &'static str,
    /// What is wrong and what is accepted instead
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn validate_dns_timeout(dns_timeout_secs: Option<u64>) -> Result<(), ConfigValidationError> {
    if dns_timeout_secs == Some(0) {
        return Err(ConfigValidationError::new(
            "dns_timeout_secs",
            "must be greater than 0 when set (omit it to keep the resolver default)",
        ));
    }
    Ok(())
}

/// Configuration for the bulk DMARC checker.
///
/// # Examples
///
/// ```no_run
/// use crmsec::DmarcConfig;
/// use std::path::PathBuf;
///
/// let config = DmarcConfig {
///     input: PathBuf::from("domains.csv"),
///     batch_limit: 100,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct DmarcConfig {
    /// CSV file with a header row and `companyId,domain` columns
    pub input: PathBuf,

    /// Append-only CSV file receiving `companyId,domain,TRUE|FALSE` rows
    pub output: PathBuf,

    /// Maximum number of concurrent queries per batch
    pub batch_limit: usize,

    /// Nameservers to query instead of the system configuration
    pub nameservers: Vec<IpAddr>,

    /// Per-query timeout override; `None` keeps the resolver default
    pub dns_timeout_secs: Option<u64>,
}

impl Default for DmarcConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_DMARC_INPUT),
            output: PathBuf::from(DEFAULT_DMARC_OUTPUT),
            batch_limit: BATCH_LIMIT,
            nameservers: Vec::new(),
            dns_timeout_secs: None,
        }
    }
}

impl DmarcConfig {
    /// Checks the configuration before any file or network access.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.batch_limit == 0 {
            return Err(ConfigValidationError::new(
                "batch_limit",
                "must be greater than 0",
            ));
        }
        if self.input == self.output {
            return Err(ConfigValidationError::new(
                "output",
                format!(
                    "must differ from the input file ({})",
                    self.input.display()
                ),
            ));
        }
        validate_dns_timeout(self.dns_timeout_secs)
    }
}

/// Configuration for the CRM lead exporter.
#[derive(Debug, Clone)]
pub struct LeadsConfig {
    /// API account identifier
    pub account_id: String,

    /// API secret key
    pub secret_key: String,

    /// JSON-RPC endpoint
    pub endpoint: String,

    /// Leads requested per page
    pub limit: u32,

    /// Pause between pages in milliseconds
    pub page_delay_ms: u64,

    /// HTTP request timeout in seconds
    pub timeout_seconds: u64,

    /// Output CSV path (stdout if `None`)
    pub output: Option<PathBuf>,
}

impl Default for LeadsConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            secret_key: String::new(),
            endpoint: DEFAULT_CRM_ENDPOINT.to_string(),
            limit: LEADS_PAGE_LIMIT,
            page_delay_ms: LEADS_PAGE_DELAY_MS,
            timeout_seconds: CRM_REQUEST_TIMEOUT_SECS,
            output: None,
        }
    }
}

impl LeadsConfig {
    /// Checks the configuration before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.account_id.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "account_id",
                "is required (--account-id or CRM_ACCOUNT_ID)",
            ));
        }
        if self.secret_key.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "secret_key",
                "is required (--secret-key or CRM_SECRET_KEY)",
            ));
        }
        if self.limit == 0 {
            return Err(ConfigValidationError::new("limit", "must be greater than 0"));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "timeout_seconds",
                "must be greater than 0",
            ));
        }
        match url::Url::parse(&self.endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            Ok(url) => Err(ConfigValidationError::new(
                "endpoint",
                format!("unsupported scheme '{}', expected http or https", url.scheme()),
            )),
            Err(e) => Err(ConfigValidationError::new(
                "endpoint",
                format!("'{}' is not a valid URL: {e}", self.endpoint),
            )),
        }
    }
}

/// Configuration for the hash blocklist checker.
#[derive(Debug, Clone)]
pub struct HashesConfig {
    /// Text report containing `\tHASH ... => <hash>` lines
    pub report: PathBuf,

    /// Data-query key placed in front of the zone
    pub key: String,

    /// Reputation list zone
    pub zone: String,

    /// Optional CSV output path
    pub output: Option<PathBuf>,

    /// Nameservers to query instead of the system configuration
    pub nameservers: Vec<IpAddr>,

    /// Per-query timeout override; `None` keeps the resolver default
    pub dns_timeout_secs: Option<u64>,
}

impl Default for HashesConfig {
    fn default() -> Self {
        Self {
            report: PathBuf::from(DEFAULT_HASH_REPORT),
            key: String::new(),
            zone: DEFAULT_HBL_ZONE.to_string(),
            output: None,
            nameservers: Vec::new(),
            dns_timeout_secs: None,
        }
    }
}

impl HashesConfig {
    /// Checks the configuration before the report is read.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.key.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "key",
                "is required (--key or SPAMHAUS_DQS_KEY)",
            ));
        }
        if self.key.contains('.') {
            return Err(ConfigValidationError::new(
                "key",
                "must be a single DNS label (no dots)",
            ));
        }
        if self.zone.trim_matches('.').is_empty() {
            return Err(ConfigValidationError::new("zone", "must not be empty"));
        }
        validate_dns_timeout(self.dns_timeout_secs)
    }
}
