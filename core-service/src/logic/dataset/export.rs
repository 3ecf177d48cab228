//! Export: every uploaded row plus heuristic-derived prediction columns.
//!
//! The derived columns always come from the heuristic scorer, never from
//! placeholder values.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::{Dataset, DatasetError};
use crate::logic::scoring::{heuristic_pd, RiskCategory};

pub const PD_SCORE_COLUMN: &str = "pd_score";
pub const PREDICTION_PROBA_COLUMN: &str = "prediction_proba";
pub const DEFAULT_FLAG_COLUMN: &str = "default_flag";
pub const RISK_CATEGORY_COLUMN: &str = "risk_category";

pub const DERIVED_COLUMNS: [&str; 4] = [
    PD_SCORE_COLUMN,
    PREDICTION_PROBA_COLUMN,
    DEFAULT_FLAG_COLUMN,
    RISK_CATEGORY_COLUMN,
];

/// Write the export as CSV. Returns the number of data rows written.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<usize, DatasetError> {
    let source_columns: Vec<&str> = dataset
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|c| !DERIVED_COLUMNS.contains(c))
        .collect();

    let mut out = csv::Writer::from_writer(writer);

    let header = source_columns.iter().copied().chain(DERIVED_COLUMNS);
    out.write_record(header).map_err(export_error)?;

    for row in dataset.rows() {
        let pd = heuristic_pd(row, dataset.stats());
        let proba = pd / 100.0;

        let mut record: Vec<String> = source_columns
            .iter()
            .map(|c| row.get(c).map(|cell| cell.to_string()).unwrap_or_default())
            .collect();
        record.push(format!("{:.2}", pd));
        record.push(format!("{:.4}", proba));
        record.push(format!("{:.4}", proba));
        record.push(RiskCategory::from_pd(pd).label().to_string());

        out.write_record(&record).map_err(export_error)?;
    }

    out.flush()?;
    Ok(dataset.len())
}

/// Write the export to `path` (truncating)
pub fn to_csv_file(dataset: &Dataset, path: impl AsRef<Path>) -> Result<usize, DatasetError> {
    let file = File::create(path.as_ref())?;
    let count = write_csv(dataset, file)?;
    log::info!("Exported {} rows to {}", count, path.as_ref().display());
    Ok(count)
}

fn export_error(e: csv::Error) -> DatasetError {
    DatasetError::Export(e.to_string())
}
