// Shared test helpers: an in-memory resolver and input file builders.
//
// This module is used by several test files to avoid touching the network.
#![allow(dead_code)] // Each test file uses a different subset

use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crmsec::dns::{RecordLookup, RecordType};
use crmsec::error_handling::LookupFailure;
use tempfile::NamedTempFile;

/// What the mock resolver answers for a name.
#[derive(Debug, Clone)]
pub enum MockAnswer {
    Records(Vec<String>),
    Fail(LookupFailure),
}

/// Lookup lifecycle events, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupEvent {
    Started(String),
    Finished(String),
}

/// Resolver answering from a fixed table. Unknown names are NXDOMAIN.
///
/// Every lookup yields once before answering so that concurrently launched
/// lookups overlap, which makes the in-flight counters meaningful.
#[derive(Debug, Default)]
pub struct MockResolver {
    answers: HashMap<String, MockAnswer>,
    events: Mutex<Vec<LookupEvent>>,
    queried_types: Mutex<Vec<RecordType>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, name: &str, records: &[&str]) -> Self {
        self.answers.insert(
            name.to_string(),
            MockAnswer::Records(records.iter().map(|r| r.to_string()).collect()),
        );
        self
    }

    pub fn with_failure(mut self, name: &str, failure: LookupFailure) -> Self {
        self.answers
            .insert(name.to_string(), MockAnswer::Fail(failure));
        self
    }

    /// Names queried, in the order lookups started.
    pub fn queried_names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                LookupEvent::Started(name) => Some(name.clone()),
                LookupEvent::Finished(_) => None,
            })
            .collect()
    }

    pub fn queried_types(&self) -> Vec<RecordType> {
        self.queried_types.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<LookupEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl RecordLookup for MockResolver {
    async fn lookup_records(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, LookupFailure> {
        self.events
            .lock()
            .unwrap()
            .push(LookupEvent::Started(name.to_string()));
        self.queried_types.lock().unwrap().push(record_type);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::task::yield_now().await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.events
            .lock()
            .unwrap()
            .push(LookupEvent::Finished(name.to_string()));

        match self.answers.get(name) {
            Some(MockAnswer::Records(records)) => Ok(records.clone()),
            Some(MockAnswer::Fail(failure)) => Err(failure.clone()),
            None => Err(LookupFailure::NxDomain),
        }
    }
}

/// Writes `contents` to a temporary file (sync I/O).
pub fn write_temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// Builds a DMARC input CSV with a header row and one row per domain.
/// Company ids are the 1-based row numbers.
pub fn domains_csv(domains: &[&str]) -> String {
    let mut csv = String::from("companyid,domain\n");
    for (i, domain) in domains.iter().enumerate() {
        csv.push_str(&format!("{},{}\n", i + 1, domain));
    }
    csv
}
