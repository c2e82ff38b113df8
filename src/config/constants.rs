//! Configuration constants.
//!
//! Defaults for every subcommand. The CLI exposes most of them as flags.

// DMARC checker
/// Maximum number of DNS queries in flight per batch.
pub const BATCH_LIMIT: usize = 500;
/// Default DMARC input file (`companyId,domain` with a header row).
pub const DEFAULT_DMARC_INPUT: &str = "input/lgcrm_domains.csv";
/// Default append-only DMARC output file.
pub const DEFAULT_DMARC_OUTPUT: &str = "output/results.csv";
/// Label prepended to every domain when looking up its DMARC policy.
pub const DMARC_LABEL: &str = "_dmarc";

// Lead exporter
/// CRM public API endpoint (JSON-RPC over HTTPS POST).
pub const DEFAULT_CRM_ENDPOINT: &str = "https://api.sharpspring.com/pubapi/v1.2/";
/// Leads requested per page.
pub const LEADS_PAGE_LIMIT: u32 = 500;
/// Pause between pages in milliseconds, to stay under the API rate limit.
pub const LEADS_PAGE_DELAY_MS: u64 = 7;
/// HTTP request timeout for the CRM API
pub const CRM_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Fields requested for each lead.
pub const LEAD_FIELDS: &[&str] = &["id", "emailAddress"];

// Hash blocklist checker
/// Default hash report file.
pub const DEFAULT_HASH_REPORT: &str = "hashes.txt";
/// Prefix identifying a hash line in the report.
pub const HASH_LINE_PREFIX: &str = "\tHASH";
/// Separator preceding the hash token on a hash line.
pub const HASH_TOKEN_SEPARATOR: &str = "=> ";
/// Reputation list zone queried below the data-query key.
pub const DEFAULT_HBL_ZONE: &str = "hbl.dq.spamhaus.net";
/// Label placed between the hash and the key in the query name.
pub const HBL_URL_LABEL: &str = "_url";
/// First three octets of the list's error return codes (`127.255.255.0/24`),
/// e.g. `.254` for queries through a public resolver, `.255` for excessive queries.
pub const HBL_ERROR_PREFIX: [u8; 3] = [127, 255, 255];
