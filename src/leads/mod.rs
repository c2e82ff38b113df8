//! CRM lead exporter.
//!
//! Pages through the CRM `getLeads` JSON-RPC method with `limit`/`offset`
//! until a page comes back empty, then writes `id,emailAddress` rows as CSV.

mod types;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use csv::Writer;
use log::{debug, info};
use serde_json::Map;

use crate::config::{LeadsConfig, LEAD_FIELDS};
use crate::error_handling::{LeadsError, OutputError};
use crate::initialization::init_client;

use types::{api_error_message, GetLeadsParams, RpcRequest, RpcResponse};

// Re-export public API
pub use types::Lead;

/// Longest response body kept in a `LeadsError::Status`.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Summary of a lead export.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadsReport {
    /// Leads written
    pub total_leads: usize,
    /// Non-empty pages fetched
    pub pages: usize,
    /// Output file (`None` for stdout)
    pub output: Option<PathBuf>,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Fetches one page of leads starting at `offset`.
///
/// # Errors
///
/// Returns a `LeadsError` on transport failure, non-success status, an
/// undecodable body, or an `error` reported by the API.
pub async fn fetch_page(
    client: &reqwest::Client,
    config: &LeadsConfig,
    offset: u64,
) -> Result<Vec<Lead>, LeadsError> {
    let request = RpcRequest {
        id: 1,
        method: "getLeads",
        params: GetLeadsParams {
            filter: Map::new(),
            limit: config.limit,
            offset,
            fields: LEAD_FIELDS,
        },
    };

    let response = client
        .post(&config.endpoint)
        .query(&[
            ("accountID", config.account_id.as_str()),
            ("secretKey", config.secret_key.as_str()),
        ])
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LeadsError::Status {
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    let envelope: RpcResponse = response.json().await?;
    if let Some(message) = api_error_message(&envelope.error) {
        return Err(LeadsError::Api(message));
    }
    let result = envelope.result.ok_or(LeadsError::MissingResult)?;
    Ok(result.lead.into_iter().map(Lead::from).collect())
}

/// Fetches every lead, page by page, stopping at the first empty page.
///
/// Sleeps `config.page_delay_ms` between pages. Returns the leads in API order
/// and the number of non-empty pages.
///
/// # Errors
///
/// Returns the first page error; nothing is retried.
pub async fn fetch_all_leads(
    client: &reqwest::Client,
    config: &LeadsConfig,
) -> Result<(Vec<Lead>, usize), LeadsError> {
    let mut records = Vec::new();
    let mut offset: u64 = 0;
    let mut page: usize = 0;

    loop {
        debug!("Requesting leads at offset {offset}");
        let leads = fetch_page(client, config, offset).await?;
        if leads.is_empty() {
            break;
        }

        page += 1;
        let found = leads.len();
        records.extend(leads);
        offset += u64::from(config.limit);
        info!("page {page}: {found} leads ({} total)", records.len());

        if config.page_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.page_delay_ms)).await;
        }
    }

    Ok((records, page))
}

/// Writes leads as CSV with an `id,emailAddress` header.
///
/// # Errors
///
/// Returns an `OutputError` if a row cannot be written or flushed.
pub fn write_leads<W: Write>(inner: W, leads: &[Lead]) -> Result<(), OutputError> {
    let mut writer = Writer::from_writer(inner);
    writer.write_record(LEAD_FIELDS)?;
    for lead in leads {
        writer.write_record([lead.id.as_str(), lead.email_address.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Runs the lead export described by `config`.
///
/// # Errors
///
/// Fails on an invalid configuration, any API error, or an output failure.
/// The output file is only created once every page has been fetched.
pub async fn run_lead_export(config: LeadsConfig) -> Result<LeadsReport> {
    config.validate()?;
    let start_time = Instant::now();

    let client = init_client(config.timeout_seconds).context("Failed to initialize HTTP client")?;
    let (leads, pages) = fetch_all_leads(&client, &config)
        .await
        .context("Failed to export leads")?;

    match &config.output {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|source| OutputError::Open {
                path: path.clone(),
                source,
            })?;
            write_leads(file, &leads)?;
            info!("Wrote {} leads to {}", leads.len(), path.display());
        }
        None => write_leads(io::stdout().lock(), &leads)?,
    }

    Ok(LeadsReport {
        total_leads: leads.len(),
        pages,
        output: config.output,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}
