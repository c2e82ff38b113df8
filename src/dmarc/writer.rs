//! Result output.
//!
//! Rows are `companyId,domain,TRUE|FALSE` with no header, flushed one at a time
//! so a killed run keeps everything written so far.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use colored::*;
use csv::{Terminator, WriterBuilder};
use log::info;

use super::QueryOutcome;
use crate::error_handling::OutputError;

/// Append-only sink for DMARC verdicts.
#[derive(Debug)]
pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ResultWriter<File> {
    /// Opens `path` for appending, creating it and its parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Open` if the directory or file cannot be created or opened.
    pub fn append_to(path: &Path) -> Result<Self, OutputError> {
        let open_error = |source| OutputError::Open {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(open_error)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(open_error)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> ResultWriter<W> {
    /// Wraps any writer. No header row is ever written.
    pub fn new(inner: W) -> Self {
        let writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::CRLF)
            .from_writer(inner);
        Self { writer }
    }

    /// Writes and flushes one row, then prints the progress line for it.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Write` or `OutputError::Flush` if the sink fails.
    pub fn write_outcome(&mut self, outcome: &QueryOutcome) -> Result<(), OutputError> {
        self.writer.write_record([
            outcome.company_id.as_str(),
            outcome.domain.as_str(),
            outcome.verdict(),
        ])?;
        self.writer.flush()?;

        match &outcome.failure {
            None => info!(
                " {} {}\t\t=> {}",
                "[+++]".green(),
                outcome.domain,
                "TRUE".green().bold()
            ),
            Some(failure) => info!(
                " {} {}\t\t=> {} ({})",
                "[!!!]".red(),
                outcome.domain,
                "FALSE".red().bold(),
                failure
            ),
        }
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Flush` if buffered data cannot be written.
    pub fn into_inner(self) -> Result<W, OutputError> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Flush(e.into_error()))
    }
}
