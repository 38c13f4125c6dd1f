//! Roster CSV import/export (one player per row, name in the first column).

use crate::models::{Player, SessionError};

const NAME_HEADER: &str = "name";

/// Read player names from CSV text. Blank rows are skipped; a first row reading `name`
/// (any case) is treated as a header. Extra columns are ignored.
pub fn parse_roster_csv(data: &[u8]) -> Result<Vec<Player>, SessionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut names = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| SessionError::Import(e.to_string()))?;
        let Some(first) = record.get(0) else {
            continue;
        };
        if first.is_empty() {
            continue;
        }
        if i == 0 && first.eq_ignore_ascii_case(NAME_HEADER) {
            continue;
        }
        names.push(first.to_string());
    }
    Ok(names)
}

/// Write the roster as CSV with a `name` header.
pub fn roster_to_csv(names: &[Player]) -> Result<String, SessionError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([NAME_HEADER])
        .map_err(|e| SessionError::Import(e.to_string()))?;
    for name in names {
        writer
            .write_record([name])
            .map_err(|e| SessionError::Import(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| SessionError::Import(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SessionError::Import(e.to_string()))
}
