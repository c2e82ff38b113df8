//! Domain list input.
//!
//! The input is a CSV file with a header row. Column 0 is the company id and
//! column 1 the domain; further columns are ignored.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use super::DomainRecord;
use crate::error_handling::InputError;

/// Reads every domain record from `path`, in file order.
///
/// The whole file is read before returning so a malformed row aborts the run
/// before any query is issued or any output row written.
///
/// # Errors
///
/// Returns `InputError::Csv` if the file cannot be opened or parsed, and
/// `InputError::MissingColumn` for a row with fewer than two columns.
pub fn read_domain_records(path: &Path) -> Result<Vec<DomainRecord>, InputError> {
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| InputError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    collect_records(reader, path)
}

fn collect_records<R: Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<Vec<DomainRecord>, InputError> {
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|source| InputError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        match (row.get(0), row.get(1)) {
            (Some(company_id), Some(domain)) => records.push(DomainRecord {
                company_id: company_id.trim().to_string(),
                domain: domain.trim().to_string(),
            }),
            _ => {
                return Err(InputError::MissingColumn {
                    line: row.position().map_or(0, |p| p.line()),
                    found: row.len(),
                })
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_input(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write input");
        file.flush().expect("Failed to flush input");
        file
    }

    #[test]
    fn test_header_is_skipped_and_order_kept() {
        let file = write_input(
            "companyid,domain\n1,good.example\n2,bad.example\n3,nodmarc.example\n",
        );
        let records = read_domain_records(file.path()).unwrap();
        assert_eq!(
            records,
            vec![
                DomainRecord::new("1", "good.example"),
                DomainRecord::new("2", "bad.example"),
                DomainRecord::new("3", "nodmarc.example"),
            ]
        );
    }

    #[test]
    fn test_header_only_input_is_empty() {
        let file = write_input("companyid,domain\n");
        assert!(read_domain_records(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_empty_file_is_empty() {
        let file = write_input("");
        assert!(read_domain_records(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_fields_are_trimmed_and_extra_columns_ignored() {
        let file = write_input("id,domain,owner\n 7 , example.org ,ops\n");
        let records = read_domain_records(file.path()).unwrap();
        assert_eq!(records, vec![DomainRecord::new("7", "example.org")]);
    }

    #[test]
    fn test_quoted_fields() {
        let file = write_input("id,domain\n\"42\",\"quoted.example\"\n");
        let records = read_domain_records(file.path()).unwrap();
        assert_eq!(records[0].domain, "quoted.example");
    }

    #[test]
    fn test_row_without_domain_column_is_rejected() {
        let file = write_input("id,domain\n1,ok.example\n2\n");
        match read_domain_records(file.path()) {
            Err(InputError::MissingColumn { line, found }) => {
                assert_eq!(line, 3);
                assert_eq!(found, 1);
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.csv");
        let err = read_domain_records(&missing).unwrap_err();
        assert!(matches!(err, InputError::Csv { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }
}
