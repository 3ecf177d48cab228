//! Prediction Gateway
//!
//! Preferred scoring path. Fetches the model's required features once,
//! projects rows onto them, posts the batch and returns one prediction per
//! row. Callers strip the ground-truth label before calling.
//!
//! - `client`: reqwest backend for the scoring service
//! - `cache`: process-wide required-features cell

pub mod cache;
pub mod client;

#[cfg(test)]
pub(crate) mod test_server;

pub use cache::RequiredFeaturesCache;
pub use client::{GatewayConfig, HttpBackend};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::features::build_model_row;
use super::value::UserRow;

/// One result row from the scoring service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub user_id: String,
    /// Probability of default as a fraction, 0-1
    pub pd: f64,
    pub risk_band: String,
    pub credit_score: i64,
}

/// Gateway errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status; the message is the raw response body
    #[error("{body}")]
    Service { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Expected {expected} prediction(s), service returned {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

/// Transport to the scoring service. Swappable for test doubles.
#[allow(async_fn_in_trait)]
pub trait ScoringBackend {
    async fn fetch_required_features(&self) -> Result<Vec<String>, GatewayError>;

    async fn predict(&self, rows: &[UserRow]) -> Result<Vec<Prediction>, GatewayError>;
}

pub struct PredictionGateway<B> {
    backend: B,
    cache: Arc<RequiredFeaturesCache>,
}

impl<B: ScoringBackend> PredictionGateway<B> {
    pub fn new(backend: B) -> Self {
        Self::with_cache(backend, Arc::new(RequiredFeaturesCache::new()))
    }

    /// Share one cache between gateways (one per process)
    pub fn with_cache(backend: B, cache: Arc<RequiredFeaturesCache>) -> Self {
        Self { backend, cache }
    }

    pub fn cache(&self) -> &Arc<RequiredFeaturesCache> {
        &self.cache
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Required features, fetched once. Any failure degrades to an empty
    /// list (rows pass through unmodified) instead of failing the caller.
    pub async fn required_features(&self) -> Vec<String> {
        let was_populated = self.cache.is_populated();

        match self
            .cache
            .get_or_fetch(|| self.backend.fetch_required_features())
            .await
        {
            Ok(features) => {
                if !was_populated {
                    log::info!("Required features cached ({} features)", features.len());
                }
                features.to_vec()
            }
            Err(e) => {
                log::warn!("Required features unavailable ({}), sending rows unmodified", e);
                Vec::new()
            }
        }
    }

    /// Score a batch remotely. One prediction per input row, same order.
    pub async fn predict_risk(&self, rows: &[UserRow]) -> Result<Vec<Prediction>, GatewayError> {
        let required = self.required_features().await;

        let payload: Vec<UserRow> = if required.is_empty() {
            rows.to_vec()
        } else {
            rows.iter().map(|row| build_model_row(row, &required)).collect()
        };

        let predictions = self.backend.predict(&payload).await?;

        if predictions.len() != rows.len() {
            return Err(GatewayError::CountMismatch {
                expected: rows.len(),
                actual: predictions.len(),
            });
        }
        if let Some(bad) = predictions.iter().find(|p| !p.pd.is_finite()) {
            return Err(GatewayError::Decode(format!("non-finite pd for user {}", bad.user_id)));
        }

        Ok(predictions)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::logic::value::Cell;
    use std::cell::{Cell as Counter, RefCell};

    /// Scripted backend recording every call
    #[derive(Default)]
    pub(crate) struct StubBackend {
        pub required: Option<Vec<String>>,
        pub response: Option<Result<Vec<Prediction>, GatewayError>>,
        pub feature_calls: Counter<usize>,
        pub sent: RefCell<Vec<Vec<UserRow>>>,
    }

    impl StubBackend {
        pub(crate) fn predictions(&self) -> usize {
            self.sent.borrow().len()
        }
    }

    pub(crate) fn prediction(user_id: &str, pd: f64) -> Prediction {
        Prediction {
            user_id: user_id.to_string(),
            pd,
            risk_band: "Medium".to_string(),
            credit_score: 900 - (pd * 600.0).round() as i64,
        }
    }

    impl ScoringBackend for StubBackend {
        async fn fetch_required_features(&self) -> Result<Vec<String>, GatewayError> {
            self.feature_calls.set(self.feature_calls.get() + 1);
            self.required
                .clone()
                .ok_or_else(|| GatewayError::Network("connection refused".to_string()))
        }

        async fn predict(&self, rows: &[UserRow]) -> Result<Vec<Prediction>, GatewayError> {
            self.sent.borrow_mut().push(rows.to_vec());
            match &self.response {
                Some(response) => response.clone(),
                None => Ok(rows
                    .iter()
                    .map(|r| prediction(&r.user_id().unwrap_or_default(), 0.25))
                    .collect()),
            }
        }
    }

    fn row() -> UserRow {
        let mut row = UserRow::new();
        row.insert("user_id", "U-1");
        row.insert("age", "30");
        row.insert("employment_type", "Salaried");
        row.insert("extra", "x");
        row
    }

    #[tokio::test]
    async fn test_required_features_fetched_once() {
        let gateway = PredictionGateway::new(StubBackend {
            required: Some(vec!["age".to_string()]),
            ..Default::default()
        });

        assert_eq!(gateway.required_features().await, vec!["age"]);
        assert_eq!(gateway.required_features().await, vec!["age"]);
        gateway.predict_risk(&[row()]).await.unwrap();

        assert_eq!(gateway.backend().feature_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_shared_cache_skips_fetch() {
        let cache = Arc::new(RequiredFeaturesCache::populated(vec!["age".to_string()]));
        let gateway = PredictionGateway::with_cache(StubBackend::default(), cache);

        assert_eq!(gateway.required_features().await, vec!["age"]);
        assert_eq!(gateway.backend().feature_calls.get(), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_passes_rows_through() {
        let gateway = PredictionGateway::new(StubBackend::default());

        gateway.predict_risk(&[row()]).await.unwrap();
        gateway.predict_risk(&[row()]).await.unwrap();

        let sent = gateway.backend().sent.borrow();
        assert_eq!(sent[0][0], row());
        // Failure isn't cached, so each call retries
        assert_eq!(gateway.backend().feature_calls.get(), 2);
    }

    #[tokio::test]
    async fn test_rows_projected_onto_required_features() {
        let gateway = PredictionGateway::new(StubBackend {
            required: Some(vec!["age".to_string(), "employment_type".to_string()]),
            ..Default::default()
        });

        let results = gateway.predict_risk(&[row()]).await.unwrap();
        assert_eq!(results[0].user_id, "U-1");

        let sent = gateway.backend().sent.borrow();
        let model_row = &sent[0][0];
        assert_eq!(model_row.len(), 3);
        assert_eq!(model_row.get("age"), Some(&Cell::Number(30.0)));
        assert_eq!(model_row.get("employment_type"), Some(&Cell::Text("Salaried".to_string())));
        assert!(!model_row.contains("extra"));
    }

    #[tokio::test]
    async fn test_service_error_message_is_body() {
        let gateway = PredictionGateway::new(StubBackend {
            required: Some(Vec::new()),
            response: Some(Err(GatewayError::Service {
                status: 400,
                body: "Missing required columns: ['age']".to_string(),
            })),
            ..Default::default()
        });

        let err = gateway.predict_risk(&[row()]).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing required columns: ['age']");
    }

    #[tokio::test]
    async fn test_count_mismatch_fails_batch() {
        let gateway = PredictionGateway::new(StubBackend {
            required: Some(Vec::new()),
            response: Some(Ok(vec![prediction("U-1", 0.2)])),
            ..Default::default()
        });

        let err = gateway.predict_risk(&[row(), row()]).await.unwrap_err();
        assert_eq!(err, GatewayError::CountMismatch { expected: 2, actual: 1 });
    }
}
