//! Cohort statistics used to normalize a single row

use serde::Serialize;

use crate::logic::value::{fields, UserRow};

/// Means over the uploaded collection. 0 when nothing valid was seen;
/// the scorer substitutes its own fallback in that case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DatasetStats {
    pub mean_aov: f64,
    pub mean_recharge: f64,
}

impl DatasetStats {
    pub fn from_rows(rows: &[UserRow]) -> Self {
        Self {
            mean_aov: mean_of(rows, fields::AVG_ORDER_VALUE),
            mean_recharge: mean_of(rows, fields::AVG_RECHARGE_AMT),
        }
    }
}

/// Mean over values that coerce; unparsable or absent cells are skipped,
/// not counted as zero
fn mean_of(rows: &[UserRow], field: &str) -> f64 {
    let (sum, count) = rows
        .iter()
        .filter_map(|row| row.number_opt(field))
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as f64;
    if mean.is_finite() {
        mean
    } else {
        0.0
    }
}
