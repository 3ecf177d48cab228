//! Request row preparation
//!
//! Turns the loosely typed JSON rows of a `/predict` call into typed feature
//! rows the scorecard can consume:
//!
//! 1. drop ground-truth label columns
//! 2. normalize cells (placeholders, currency, separators, percentages)
//! 3. check and project onto the model's feature order
//! 4. cast to the numeric / categorical schema

use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{AppError, AppResult};

/// Columns that must never reach the model
pub const LABEL_COLUMNS: [&str; 3] = ["default_flag", "target", "label"];

/// Treated as a missing cell (compared lowercase, after trimming)
pub const PLACEHOLDERS: [&str; 6] = ["", "none", "null", "nan", "na", "n/a"];

/// Columns cast to floats; missing or unparsable values become 0.0
pub const NUMERIC_FEATURES: [&str; 22] = [
    "age",
    "avg_recharge_amt",
    "recharge_freq",
    "data_usage_MB",
    "calls_peak_hours",
    "avg_days_late",
    "payment_delay_ratio",
    "avg_payment_due",
    "avg_payment_made",
    "payment_to_due_ratio",
    "sms_bank_count",
    "sms_otp_count",
    "sms_upi_count",
    "sms_fin_txn_count",
    "sms_promotional_count",
    "sms_other_count",
    "cart_abandonment_rate",
    "avg_order_value",
    "return_rate",
    "geo_variance_score",
    "months_active",
    "employer_count",
];

/// Categorical columns used when the model declares no feature order
pub const DEFAULT_CATEGORICAL: [&str; 3] = ["location", "employment_type", "salary_band"];

pub const UNKNOWN_LEVEL: &str = "unknown";

/// Cell after normalization
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Missing,
    Number(f64),
    Flag(bool),
    Text(String),
}

/// Cell after casting
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Number(f64),
    Category(String),
}

pub type FeatureRow = BTreeMap<String, Feature>;

/// Prepare a whole batch. Fails only when required columns are absent.
pub fn prepare_batch(
    rows: &[Map<String, Value>],
    feature_order: &[String],
) -> AppResult<Vec<FeatureRow>> {
    let normalized: Vec<BTreeMap<String, Normalized>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .filter(|(column, _)| !LABEL_COLUMNS.contains(&column.as_str()))
                .map(|(column, value)| (column.clone(), normalize_value(value)))
                .collect()
        })
        .collect();

    let present: BTreeSet<&str> = normalized
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let columns: Vec<String> = if feature_order.is_empty() {
        present.iter().map(|c| c.to_string()).collect()
    } else {
        let missing: Vec<&str> = feature_order
            .iter()
            .map(String::as_str)
            .filter(|c| !present.contains(c))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required columns: {}. Expected exactly {}",
                quoted_list(&missing),
                quoted_list(feature_order),
            )));
        }
        feature_order.to_vec()
    };

    let categorical = categorical_columns(feature_order);

    Ok(normalized
        .into_iter()
        .map(|mut row| {
            columns
                .iter()
                .filter_map(|column| {
                    let cell = row.remove(column).unwrap_or(Normalized::Missing);
                    cast(column, cell, &categorical).map(|feature| (column.clone(), feature))
                })
                .collect()
        })
        .collect())
}

/// Normalize one JSON cell
pub fn normalize_value(value: &Value) -> Normalized {
    match value {
        Value::Null => Normalized::Missing,
        Value::Number(n) => n.as_f64().map_or(Normalized::Missing, Normalized::Number),
        Value::Bool(b) => Normalized::Flag(*b),
        Value::String(s) => normalize_text(s),
        other => Normalized::Text(other.to_string()),
    }
}

/// `" ₹1,200 "` -> 1200, `"12%"` -> 0.12, `"n/a"` -> missing
pub fn normalize_text(raw: &str) -> Normalized {
    let trimmed = raw.trim();
    if PLACEHOLDERS.contains(&trimmed.to_lowercase().as_str()) {
        return Normalized::Missing;
    }

    let stripped: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '₹' | '$' | ','))
        .collect();
    let (digits, percent) = match stripped.strip_suffix('%') {
        Some(rest) => (rest, true),
        None => (stripped.as_str(), false),
    };

    match digits.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Normalized::Number(if percent { n / 100.0 } else { n }),
        _ => Normalized::Text(trimmed.to_string()),
    }
}

fn categorical_columns(feature_order: &[String]) -> BTreeSet<String> {
    if feature_order.is_empty() {
        DEFAULT_CATEGORICAL.iter().map(|c| c.to_string()).collect()
    } else {
        feature_order
            .iter()
            .filter(|c| !NUMERIC_FEATURES.contains(&c.as_str()))
            .cloned()
            .collect()
    }
}

/// `None` drops the cell (missing value in an unscheduled column)
fn cast(column: &str, cell: Normalized, categorical: &BTreeSet<String>) -> Option<Feature> {
    if NUMERIC_FEATURES.contains(&column) {
        return Some(Feature::Number(match cell {
            Normalized::Number(n) => n,
            Normalized::Flag(b) => flag_value(b),
            Normalized::Missing | Normalized::Text(_) => 0.0,
        }));
    }

    match cell {
        Normalized::Missing if categorical.contains(column) => {
            Some(Feature::Category(UNKNOWN_LEVEL.to_string()))
        }
        Normalized::Missing => None,
        Normalized::Number(n) if categorical.contains(column) => {
            Some(Feature::Category(n.to_string()))
        }
        Normalized::Number(n) => Some(Feature::Number(n)),
        Normalized::Flag(b) if categorical.contains(column) => {
            Some(Feature::Category(if b { "True" } else { "False" }.to_string()))
        }
        Normalized::Flag(b) => Some(Feature::Number(flag_value(b))),
        Normalized::Text(s) => Some(Feature::Category(s)),
    }
}

fn flag_value(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// `['a', 'b']`
fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    let inner: Vec<String> = items.iter().map(|s| format!("'{}'", s.as_ref())).collect();
    format!("[{}]", inner.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Map<String, Value>> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_object().unwrap().clone())
            .collect()
    }

    fn order(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text(" ₹1,200 "), Normalized::Number(1200.0));
        assert_eq!(normalize_text("$5.20"), Normalized::Number(5.2));
        assert_eq!(normalize_text("12%"), Normalized::Number(0.12));
        assert_eq!(normalize_text("N/A"), Normalized::Missing);
        assert_eq!(normalize_text("  "), Normalized::Missing);
        assert_eq!(normalize_text(" Salaried "), Normalized::Text("Salaried".to_string()));
        assert_eq!(normalize_text("inf"), Normalized::Text("inf".to_string()));
    }

    #[test]
    fn test_booleans_cast_per_column_kind() {
        assert_eq!(normalize_value(&json!(true)), Normalized::Flag(true));

        let batch = rows(json!([
            {"months_active": true, "employment_type": false, "has_card": true},
            {"months_active": false, "employment_type": true, "has_card": false}
        ]));
        let prepared = prepare_batch(&batch, &[]).unwrap();

        assert_eq!(prepared[0]["months_active"], Feature::Number(1.0));
        assert_eq!(prepared[1]["months_active"], Feature::Number(0.0));
        assert_eq!(prepared[0]["employment_type"], Feature::Category("False".to_string()));
        assert_eq!(prepared[1]["has_card"], Feature::Number(0.0));
    }

    #[test]
    fn test_labels_dropped() {
        let batch = rows(json!([{"age": 30, "default_flag": 1, "target": 0, "label": 1}]));
        let prepared = prepare_batch(&batch, &[]).unwrap();
        assert_eq!(prepared[0].len(), 1);
        assert_eq!(prepared[0]["age"], Feature::Number(30.0));
    }

    #[test]
    fn test_missing_required_columns() {
        let batch = rows(json!([{"age": 30}]));
        let err = prepare_batch(&batch, &order(&["age", "employment_type"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required columns: ['employment_type']. Expected exactly ['age', 'employment_type']"
        );
    }

    #[test]
    fn test_column_present_in_any_row_is_enough() {
        let batch = rows(json!([
            {"age": "31", "employment_type": "Salaried"},
            {"age": "n/a"}
        ]));
        let prepared = prepare_batch(&batch, &order(&["age", "employment_type"])).unwrap();

        assert_eq!(prepared[1]["age"], Feature::Number(0.0));
        assert_eq!(prepared[1]["employment_type"], Feature::Category("unknown".to_string()));
    }

    #[test]
    fn test_projection_and_cast() {
        let batch = rows(json!([{
            "user_id": "U-1",
            "age": "thirty",
            "avg_recharge_amt": "₹350",
            "employment_type": null,
            "location": 110001
        }]));
        let prepared =
            prepare_batch(&batch, &order(&["age", "avg_recharge_amt", "employment_type", "location"]))
                .unwrap();
        let row = &prepared[0];

        assert!(!row.contains_key("user_id"));
        assert_eq!(row["age"], Feature::Number(0.0));
        assert_eq!(row["avg_recharge_amt"], Feature::Number(350.0));
        assert_eq!(row["employment_type"], Feature::Category("unknown".to_string()));
        assert_eq!(row["location"], Feature::Category("110001".to_string()));
    }
}
