//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `crmsec` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use crmsec::config::{Cli, Command};
use crmsec::initialization::init_logger_with;
use crmsec::{run_dmarc_check, run_hash_check, run_lead_export};

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials and keys may live in a .env file next to the working directory
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli.command).await {
        eprintln!("crmsec error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Dmarc(args) => {
            let report = run_dmarc_check(args.into()).await?;
            println!(
                "✅ Checked {} domain{} ({} with DMARC, {} without) in {:.1}s",
                report.total_domains,
                if report.total_domains == 1 { "" } else { "s" },
                report.with_dmarc,
                report.without_dmarc,
                report.elapsed_seconds
            );
            println!("Results appended to {}", report.output.display());
        }
        Command::Leads(args) => {
            let report = run_lead_export(args.into()).await?;
            // Keep stdout clean when it carries the CSV itself
            if let Some(path) = &report.output {
                println!(
                    "✅ Exported {} leads over {} page(s) in {:.1}s to {}",
                    report.total_leads,
                    report.pages,
                    report.elapsed_seconds,
                    path.display()
                );
            }
        }
        Command::Hashes(args) => {
            let report = run_hash_check(args.into()).await?;
            eprintln!(
                "✅ Checked {} hash(es), {} listed, in {:.1}s",
                report.total_hashes, report.listed, report.elapsed_seconds
            );
        }
    }
    Ok(())
}
