//! Dataset Module - Uploaded borrower collection
//!
//! A collection is created wholesale (CSV parse or demo load) and is read-only
//! afterwards. Replacing it means building a new `Dataset` and swapping it in.

pub mod stats;
pub mod import;
pub mod demo;
pub mod export;


pub use stats::DatasetStats;

use crate::logic::value::UserRow;

/// Dataset ingestion / export errors
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("CSV has no header row")]
    MissingHeader,

    #[error("Export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Immutable row collection plus its cohort statistics
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<UserRow>,
    stats: DatasetStats,
}

impl Dataset {
    /// Build from rows; columns are the union of row fields, first seen first
    pub fn new(rows: Vec<UserRow>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for field in row.fields() {
                if !columns.iter().any(|c| c == field) {
                    columns.push(field.to_string());
                }
            }
        }
        Self::with_columns(columns, rows)
    }

    /// Build with an explicit column order (e.g. the CSV header)
    pub fn with_columns(columns: Vec<String>, rows: Vec<UserRow>) -> Self {
        let stats = DatasetStats::from_rows(&rows);
        Self { columns, rows, stats }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[UserRow] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn stats(&self) -> &DatasetStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row whose identifier equals `user_id` (trimmed)
    pub fn find(&self, user_id: &str) -> Option<&UserRow> {
        let wanted = user_id.trim();
        self.rows
            .iter()
            .find(|row| row.user_id().as_deref() == Some(wanted))
    }

    /// Identifiers in upload order
    pub fn user_ids(&self) -> Vec<String> {
        self.rows.iter().filter_map(UserRow::user_id).collect()
    }
}
