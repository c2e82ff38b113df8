//! DNS record extraction utilities.

/// Extracts the DMARC policy from TXT records.
///
/// DMARC records start with "v=DMARC1". Used for diagnostics only: any record
/// at `_dmarc.<domain>` counts as presence.
pub fn extract_dmarc_record(txt_records: &[String]) -> Option<String> {
    txt_records
        .iter()
        .find(|txt| txt.trim().starts_with("v=DMARC1"))
        .map(|s| s.trim().to_string())
}
