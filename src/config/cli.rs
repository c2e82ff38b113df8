//! Command-line options.
//!
//! Parsed by `clap`; each subcommand converts into its library configuration.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    BATCH_LIMIT, CRM_REQUEST_TIMEOUT_SECS, DEFAULT_CRM_ENDPOINT, DEFAULT_DMARC_INPUT,
    DEFAULT_DMARC_OUTPUT, DEFAULT_HASH_REPORT, DEFAULT_HBL_ZONE, LEADS_PAGE_DELAY_MS,
    LEADS_PAGE_LIMIT,
};
use crate::config::types::{DmarcConfig, HashesConfig, LeadsConfig, LogFormat, LogLevel};

/// Command-line options and configuration.
///
/// # Examples
///
/// ```bash
/// # Check DMARC for every domain in the default input file
/// crmsec dmarc
///
/// # Smaller batches against a specific resolver
/// crmsec dmarc domains.csv --batch-limit 100 --nameserver 1.1.1.1
///
/// # Export leads to a file
/// CRM_ACCOUNT_ID=... CRM_SECRET_KEY=... crmsec leads --output leads.csv
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "crmsec",
    version,
    about = "CRM security tooling: bulk DMARC checks, lead export, hash blocklist lookups."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Procedure to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available procedures.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check `_dmarc.<domain>` TXT records for a CSV list of domains
    Dmarc(DmarcArgs),
    /// Export leads from the CRM API
    Leads(LeadsArgs),
    /// Check report hashes against a reputation DNS list
    Hashes(HashesArgs),
}

/// Resolver overrides shared by the DNS-based subcommands.
#[derive(Debug, Args)]
pub struct ResolverArgs {
    /// Nameserver to query instead of the system configuration (repeatable)
    #[arg(long = "nameserver", value_name = "IP")]
    pub nameservers: Vec<IpAddr>,

    /// Per-query DNS timeout in seconds (default: resolver default)
    #[arg(long)]
    pub dns_timeout_secs: Option<u64>,
}

/// Options of `crmsec dmarc`.
#[derive(Debug, Args)]
pub struct DmarcArgs {
    /// CSV file with a header row and companyId,domain columns
    #[arg(value_parser, default_value = DEFAULT_DMARC_INPUT)]
    pub input: PathBuf,

    /// CSV file the verdicts are appended to
    #[arg(long, default_value = DEFAULT_DMARC_OUTPUT)]
    pub output: PathBuf,

    /// Maximum number of concurrent queries per batch
    #[arg(long, default_value_t = BATCH_LIMIT)]
    pub batch_limit: usize,

    /// DNS resolver overrides
    #[command(flatten)]
    pub resolver: ResolverArgs,
}

impl From<DmarcArgs> for DmarcConfig {
    fn from(args: DmarcArgs) -> Self {
        Self {
            input: args.input,
            output: args.output,
            batch_limit: args.batch_limit,
            nameservers: args.resolver.nameservers,
            dns_timeout_secs: args.resolver.dns_timeout_secs,
        }
    }
}

/// Options of `crmsec leads`.
#[derive(Debug, Args)]
pub struct LeadsArgs {
    /// API account ID
    #[arg(long, env = "CRM_ACCOUNT_ID", default_value = "", hide_default_value = true)]
    pub account_id: String,

    /// API secret key
    #[arg(
        long,
        env = "CRM_SECRET_KEY",
        default_value = "",
        hide_default_value = true,
        hide_env_values = true
    )]
    pub secret_key: String,

    /// JSON-RPC endpoint
    #[arg(long, default_value = DEFAULT_CRM_ENDPOINT)]
    pub endpoint: String,

    /// Leads requested per page
    #[arg(long, default_value_t = LEADS_PAGE_LIMIT)]
    pub limit: u32,

    /// Pause between pages in milliseconds
    #[arg(long, default_value_t = LEADS_PAGE_DELAY_MS)]
    pub page_delay_ms: u64,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = CRM_REQUEST_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Output CSV file (stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl From<LeadsArgs> for LeadsConfig {
    fn from(args: LeadsArgs) -> Self {
        Self {
            account_id: args.account_id,
            secret_key: args.secret_key,
            endpoint: args.endpoint,
            limit: args.limit,
            page_delay_ms: args.page_delay_ms,
            timeout_seconds: args.timeout_seconds,
            output: args.output,
        }
    }
}

/// Options of `crmsec hashes`.
#[derive(Debug, Args)]
pub struct HashesArgs {
    /// Report containing tab-indented HASH lines
    #[arg(value_parser, default_value = DEFAULT_HASH_REPORT)]
    pub report: PathBuf,

    /// Data-query key for the reputation list
    #[arg(
        long,
        env = "SPAMHAUS_DQS_KEY",
        default_value = "",
        hide_default_value = true,
        hide_env_values = true
    )]
    pub key: String,

    /// Reputation list zone
    #[arg(long, default_value = DEFAULT_HBL_ZONE)]
    pub zone: String,

    /// Output CSV file (tab-separated lines on stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// DNS resolver overrides
    #[command(flatten)]
    pub resolver: ResolverArgs,
}

impl From<HashesArgs> for HashesConfig {
    fn from(args: HashesArgs) -> Self {
        Self {
            report: args.report,
            key: args.key,
            zone: args.zone,
            output: args.output,
            nameservers: args.resolver.nameservers,
            dns_timeout_secs: args.resolver.dns_timeout_secs,
        }
    }
}
