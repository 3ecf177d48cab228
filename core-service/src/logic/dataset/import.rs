//! CSV ingestion
//!
//! Header row required. Every cell is kept as text; coercion happens at read
//! time. The identifier may sit under any of `ID_FIELDS` and is normalized
//! into `user_id`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{Dataset, DatasetError};
use crate::logic::value::{Cell, UserRow, USER_ID};

/// Parse a CSV stream into a dataset
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(DatasetError::MissingHeader);
    }

    let mut columns: Vec<String> = headers
        .iter()
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;

        let mut row: UserRow = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, value)| !header.is_empty() && !value.is_empty())
            .map(|(header, value)| (header.to_string(), Cell::Text(value.to_string())))
            .collect();

        if row.is_empty() {
            continue;
        }
        if let Some(id) = row.user_id() {
            row.insert(USER_ID, Cell::Text(id));
        }
        rows.push(row);
    }

    if !columns.iter().any(|c| c == USER_ID) && rows.iter().any(|r| r.contains(USER_ID)) {
        columns.insert(0, USER_ID.to_string());
    }

    log::info!("Parsed {} rows ({} columns) from CSV", rows.len(), columns.len());
    Ok(Dataset::with_columns(columns, rows))
}

/// Parse a CSV file into a dataset
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let file = File::open(path.as_ref())?;
    read_csv(file)
}
