//! The portable text form of a marker list: a JSON array of records.

use crate::markers::MarkerRecord;

pub fn serialize_records(records: &[MarkerRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

/// Parse exported text back into records. A JSON `null` reads as an empty list.
pub fn parse_records(text: &str) -> Result<Vec<MarkerRecord>, serde_json::Error> {
    let records: Option<Vec<MarkerRecord>> = serde_json::from_str(text)?;
    Ok(records.unwrap_or_default())
}
