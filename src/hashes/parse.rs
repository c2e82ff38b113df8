//! Hash report parsing.
//!
//! The report lists a URL on one line and, on the next, a tab-indented
//! `HASH ... => <hash>` line. Other lines are ignored.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{HASH_LINE_PREFIX, HASH_TOKEN_SEPARATOR};
use crate::error_handling::InputError;

static HEX_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]+$").expect("static regex is valid"));

/// A hash token and the URL it was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashEntry {
    /// The line preceding the hash line (empty if there is none)
    pub url: String,
    /// The hash token
    pub hash: String,
}

/// Extracts every hash entry from the report text, in report order.
pub fn parse_hash_report(contents: &str) -> Vec<HashEntry> {
    let mut entries = Vec::new();
    let mut previous: Option<&str> = None;

    for line in contents.lines() {
        if line.starts_with(HASH_LINE_PREFIX) {
            let hash = line
                .rsplit(HASH_TOKEN_SEPARATOR)
                .next()
                .unwrap_or_default()
                .trim_end();
            let url = previous.unwrap_or_default().trim_end();

            if hash.is_empty() {
                log::warn!("Skipping hash line without a token after '{url}'");
            } else {
                if !HEX_TOKEN.is_match(hash) {
                    log::warn!("Hash token '{hash}' for '{url}' is not hexadecimal");
                }
                log::info!("{url} : {hash}");
                entries.push(HashEntry {
                    url: url.to_string(),
                    hash: hash.to_string(),
                });
            }
        }
        previous = Some(line);
    }

    entries
}

/// Reads and parses the report at `path`.
///
/// # Errors
///
/// Returns `InputError::Report` if the file cannot be read.
pub fn read_hash_report(path: &Path) -> Result<Vec<HashEntry>, InputError> {
    log::info!("Getting hashes from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Report {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_hash_report(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "Scan report\n\
https://files.example.com/a.exe\n\
\tHASH (SHA256) => 9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08  \n\
https://files.example.com/b.zip\n\
\tHASH (SHA256) => 60303ae22b998861bce3b28f33eec1be758a213c86c93c076dbe9f558c11c752\n\
\tSIZE => 1024\n";

    #[test]
    fn test_hash_paired_with_preceding_line() {
        let entries = parse_hash_report(REPORT);
        assert_eq!(
            entries,
            vec![
                HashEntry {
                    url: "https://files.example.com/a.exe".into(),
                    hash: "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08".into(),
                },
                HashEntry {
                    url: "https://files.example.com/b.zip".into(),
                    hash: "60303ae22b998861bce3b28f33eec1be758a213c86c93c076dbe9f558c11c752".into(),
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_url_lines_each_keep_their_own_hash() {
        let report = "https://x.example/\n\tHASH => aa\nhttps://x.example/\n\tHASH => bb\n";
        let entries = parse_hash_report(report);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].hash, "aa");
        assert_eq!(entries[1].hash, "bb");
        assert!(entries.iter().all(|e| e.url == "https://x.example/"));
    }

    #[test]
    fn test_hash_on_first_line_has_empty_url() {
        let entries = parse_hash_report("\tHASH => abc123\n");
        assert_eq!(entries[0].url, "");
        assert_eq!(entries[0].hash, "abc123");
    }

    #[test]
    fn test_space_indented_and_empty_tokens_are_ignored() {
        let report = "u\n    HASH => abc\nv\n\tHASH => \n";
        assert!(parse_hash_report(report).is_empty());
    }

    #[test]
    fn test_crlf_report() {
        let entries = parse_hash_report("https://a.example\r\n\tHASH => ab12\r\n");
        assert_eq!(entries[0].url, "https://a.example");
        assert_eq!(entries[0].hash, "ab12");
    }

    #[test]
    fn test_missing_report_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_hash_report(&dir.path().join("hashes.txt")).unwrap_err();
        assert!(matches!(err, InputError::Report { .. }));
    }
}
