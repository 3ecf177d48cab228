//! Row Values - Untyped cells and numeric coercion
//!
//! Uploaded rows arrive untyped: parsed CSV cells are always text, demo rows
//! carry numbers, and spreadsheet exports may contain formatted currency
//! (`₹1,200`, `$5.20`, `12%`). Every numeric read goes through the coercion
//! helpers here so that a value is either a finite number or a default.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier field name used throughout the pipeline
pub const USER_ID: &str = "user_id";

/// Headers that may carry the identifier, in priority order
pub const ID_FIELDS: [&str; 4] = ["user_id", "id", "user", "User ID"];

/// Ground-truth label that must never reach the scoring service
pub const LABEL_FIELD: &str = "default_flag";

/// Known semantic fields of a borrower row
pub mod fields {
    pub const AGE: &str = "age";
    pub const LOCATION: &str = "location";
    pub const EMPLOYMENT_TYPE: &str = "employment_type";

    pub const AVG_RECHARGE_AMT: &str = "avg_recharge_amt";
    pub const RECHARGE_FREQ: &str = "recharge_freq";
    pub const SMS_BANK_COUNT: &str = "sms_bank_count";
    pub const SMS_OTP_COUNT: &str = "sms_otp_count";
    pub const SMS_UPI_COUNT: &str = "sms_upi_count";
    pub const SMS_FIN_TXN_COUNT: &str = "sms_fin_txn_count";
    pub const SMS_PROMOTIONAL_COUNT: &str = "sms_promotional_count";
    pub const SMS_OTHER_COUNT: &str = "sms_other_count";

    pub const AVG_ORDER_VALUE: &str = "avg_order_value";
    pub const CART_ABANDONMENT_RATE: &str = "cart_abandonment_rate";

    pub const PAYMENT_DELAY_RATIO: &str = "payment_delay_ratio";
    pub const GEO_VARIANCE_SCORE: &str = "geo_variance_score";
    pub const MONTHS_ACTIVE: &str = "months_active";

    pub const PD_SCORE: &str = "pd_score";
    pub const PREDICTION_PROBA: &str = "prediction_proba";
}

/// Decorations stripped from numeric-looking text before parsing
const NUMERIC_DECORATIONS: [char; 4] = ['₹', '%', ',', '$'];

// ============================================================================
// CELL
// ============================================================================

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    /// Finite numeric value of this cell, if it has one
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Number(_) => None,
            Cell::Text(s) => parse_decorated(s),
            Cell::Bool(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for text cells that are empty after trimming
    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers print without a trailing ".0" (ids like 1024)
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

// ============================================================================
// COERCION
// ============================================================================

/// Remove currency/percent/thousands decorations and surrounding whitespace
pub fn strip_decorations(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !NUMERIC_DECORATIONS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parse decorated numeric text into a finite number
pub fn parse_decorated(raw: &str) -> Option<f64> {
    let cleaned = strip_decorations(raw);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Zero-default coercion: absent or unparsable values become 0
pub fn to_number(value: Option<&Cell>) -> f64 {
    to_number_opt(value).unwrap_or(0.0)
}

/// Undefined-default coercion: absent or unparsable values stay `None`,
/// so "missing" can be told apart from "zero"
pub fn to_number_opt(value: Option<&Cell>) -> Option<f64> {
    value.and_then(Cell::as_finite)
}

// ============================================================================
// USER ROW
// ============================================================================

/// One borrower row: field name -> cell. Absent fields are simply missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRow {
    cells: BTreeMap<String, Cell>,
}

impl UserRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Cell> {
        self.cells.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Cell>) {
        self.cells.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Cell> {
        self.cells.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.cells.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field read with zero-default coercion
    pub fn number(&self, field: &str) -> f64 {
        to_number(self.get(field))
    }

    /// Field read with undefined-default coercion
    pub fn number_opt(&self, field: &str) -> Option<f64> {
        to_number_opt(self.get(field))
    }

    /// Identifier as text, first non-empty of [`ID_FIELDS`]
    pub fn user_id(&self) -> Option<String> {
        ID_FIELDS
            .iter()
            .filter_map(|field| self.get(field))
            .map(|cell| cell.to_string().trim().to_string())
            .find(|id| !id.is_empty())
    }

    /// Copy of this row without the ground-truth label
    pub fn without_label(&self) -> Self {
        let mut row = self.clone();
        row.remove(LABEL_FIELD);
        row
    }
}

impl FromIterator<(String, Cell)> for UserRow {
    fn from_iter<I: IntoIterator<Item = (String, Cell)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Serialize for UserRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cells.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UserRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // JSON null means absent
        let raw = BTreeMap::<String, Option<Cell>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(k, v)| v.map(|cell| (k, cell)))
            .collect())
    }
}
