//! Scorecard model
//!
//! Logistic scorecard loaded from JSON:
//!
//! ```json
//! {
//!   "feature_order": ["age", "employment_type"],
//!   "intercept": -2.1,
//!   "weights": { "age": -0.01 },
//!   "levels": { "employment_type": { "Salaried": -0.4 } }
//! }
//! ```
//!
//! Numeric features contribute `weight * value`, categorical ones the weight
//! of their level (unknown levels contribute 0).

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::pipeline::{Feature, FeatureRow};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringModel {
    #[serde(default)]
    feature_order: Vec<String>,
    intercept: f64,
    #[serde(default)]
    weights: BTreeMap<String, f64>,
    #[serde(default)]
    levels: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ScoringModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(raw)?;
        model.validate()?;
        Ok(model)
    }

    /// Declared feature order; empty when the model doesn't declare one
    pub fn feature_order(&self) -> &[String] {
        &self.feature_order
    }

    /// PD fraction per row, same order
    pub fn predict_proba(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, String> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let z = self.logit(row);
                if z.is_finite() {
                    Ok(sigmoid(z))
                } else {
                    Err(format!("non-finite score for row {}", i))
                }
            })
            .collect()
    }

    fn logit(&self, row: &FeatureRow) -> f64 {
        row.iter().fold(self.intercept, |z, (name, feature)| {
            let contribution = match feature {
                Feature::Number(x) => self.weights.get(name).map_or(0.0, |w| w * x),
                Feature::Category(level) => self
                    .levels
                    .get(name)
                    .and_then(|levels| levels.get(level))
                    .copied()
                    .unwrap_or(0.0),
            };
            z + contribution
        })
    }

    fn validate(&self) -> Result<(), ModelError> {
        if !self.intercept.is_finite() {
            return Err(ModelError::Invalid("intercept is not finite".to_string()));
        }
        let level_weights = self.levels.values().flat_map(|levels| levels.values());
        if self.weights.values().chain(level_weights).any(|w| !w.is_finite()) {
            return Err(ModelError::Invalid("non-finite coefficient".to_string()));
        }
        Ok(())
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
