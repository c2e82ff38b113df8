//! Integration tests for the hash blocklist checker.

mod helpers;

use crmsec::dns::RecordType;
use crmsec::error_handling::LookupFailure;
use crmsec::hashes::{check_hashes, parse_hash_report, read_hash_report};
use helpers::{write_temp_file, MockResolver};

const REPORT: &str = "\
Scan results
https://a.example/login
\tHASH sha256 => 0a1b2c
https://b.example/
\tHASH sha256 => ffee99
";

#[tokio::test]
async fn test_listed_and_clean_hashes() {
    let entries = parse_hash_report(REPORT);
    let resolver = MockResolver::new()
        .with_records("0a1b2c._url.dqskey.hbl.dq.spamhaus.net.", &["127.0.3.20"])
        .with_failure("ffee99._url.dqskey.hbl.dq.spamhaus.net.", LookupFailure::NxDomain);

    let verdicts = check_hashes(&entries, "dqskey", "hbl.dq.spamhaus.net", &resolver).await;

    assert_eq!(verdicts.len(), 2);
    assert_eq!(verdicts[0].url, "https://a.example/login");
    assert!(verdicts[0].listed);
    assert_eq!(verdicts[0].answers, vec!["127.0.3.20"]);
    assert_eq!(verdicts[1].url, "https://b.example/");
    assert!(!verdicts[1].listed);
    assert_eq!(verdicts[1].failure, Some(LookupFailure::NxDomain));
}

#[tokio::test]
async fn test_error_return_codes_are_not_listings() {
    let entries = parse_hash_report(REPORT);
    let resolver = MockResolver::new()
        .with_records("0a1b2c._url.k.zone.example.", &["127.255.255.254"])
        .with_records("ffee99._url.k.zone.example.", &["127.255.255.255"]);

    let verdicts = check_hashes(&entries, "k", "zone.example", &resolver).await;

    assert_eq!(verdicts.len(), 2);
    for verdict in &verdicts {
        assert!(!verdict.listed, "{} reported as listed", verdict.hash);
        assert!(verdict.answers.is_empty());
        match &verdict.failure {
            Some(LookupFailure::Resolver(message)) => assert!(message.contains("127.255.255.")),
            other => panic!("Expected a resolver failure, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_queries_use_a_records_in_report_order() {
    let entries = parse_hash_report(REPORT);
    let resolver = MockResolver::new();

    check_hashes(&entries, "k", "hbl.example.net", &resolver).await;

    assert_eq!(
        resolver.queried_names(),
        vec![
            "0a1b2c._url.k.hbl.example.net.",
            "ffee99._url.k.hbl.example.net."
        ]
    );
    assert!(resolver.queried_types().iter().all(|t| *t == RecordType::A));
}

#[tokio::test]
async fn test_empty_answer_is_not_listed() {
    let entries = parse_hash_report("https://c.example/\n\tHASH x => abcdef\n");
    let resolver = MockResolver::new().with_records("abcdef._url.k.zone.example.", &[]);

    let verdicts = check_hashes(&entries, "k", "zone.example", &resolver).await;

    assert!(!verdicts[0].listed);
    assert_eq!(verdicts[0].failure, Some(LookupFailure::NoRecords));
}

#[test]
fn test_read_hash_report_from_file() {
    let file = write_temp_file(REPORT);
    let entries = read_hash_report(file.path()).unwrap();
    let hashes: Vec<&str> = entries.iter().map(|e| e.hash.as_str()).collect();
    assert_eq!(hashes, vec!["0a1b2c", "ffee99"]);
}

#[test]
fn test_missing_report_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_hash_report(&dir.path().join("absent.txt")).unwrap_err();
    assert!(err.to_string().contains("absent.txt"));
}
