//! Prediction request/response payloads

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct PredictRows {
    pub rows: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub user_id: String,
    pub pd: f64,
    pub risk_band: String,
    pub credit_score: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub results: Vec<PredictionResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RequiredFeaturesResponse {
    pub required: Vec<String>,
    pub count: usize,
}

impl PredictionResult {
    pub fn new(user_id: String, pd: f64) -> Self {
        Self {
            user_id,
            pd,
            risk_band: band(pd).to_string(),
            credit_score: pd_to_score(pd),
        }
    }
}

/// Five-band label for a PD fraction
pub fn band(pd: f64) -> &'static str {
    if pd < 0.10 {
        "Very Low"
    } else if pd < 0.20 {
        "Low"
    } else if pd < 0.35 {
        "Medium"
    } else if pd < 0.50 {
        "High"
    } else {
        "Very High"
    }
}

/// 900 at PD 0, 300 at PD 1
pub fn pd_to_score(pd: f64) -> i64 {
    let score = 900 - (pd * 600.0).round_ties_even() as i64;
    score.clamp(300, 900)
}

/// Identifier of the original request row, as text
pub fn user_id_of(row: &Map<String, Value>) -> String {
    match row.get("user_id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
