//! Scoring Service Client
//!
//! HTTP backend for the remote prediction service:
//! - `GET  {base}/required_features` -> `{ required: [..] }`
//! - `POST {base}/predict` with `{ rows: [..] }` -> `{ results: [..] }`

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{GatewayError, Prediction, ScoringBackend};
use crate::logic::value::UserRow;

/// Scoring service configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        use crate::constants;

        Self {
            base_url: constants::get_api_base(),
            timeout_seconds: constants::get_api_timeout(),
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: crate::constants::normalize_base_url(&base_url.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    rows: &'a [UserRow],
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    results: Vec<Prediction>,
}

/// reqwest-backed scoring backend
pub struct HttpBackend {
    config: GatewayConfig,
    http_client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

impl ScoringBackend for HttpBackend {
    async fn fetch_required_features(&self) -> Result<Vec<String>, GatewayError> {
        let url = format!("{}/required_features", self.config.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        Ok(parse_required(&body))
    }

    async fn predict(&self, rows: &[UserRow]) -> Result<Vec<Prediction>, GatewayError> {
        let url = format!("{}/predict", self.config.base_url);

        log::info!("Requesting predictions for {} row(s) from {}", rows.len(), self.config.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&PredictRequest { rows })
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let result: PredictResponse = response
                .json()
                .await
                .map_err(|e| GatewayError::Decode(e.to_string()))?;
            Ok(result.results)
        } else {
            let body = response.text().await.unwrap_or_default();
            log::error!("Prediction failed ({}): {}", status.as_u16(), body);
            Err(GatewayError::Service {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// `required` as a list of strings; missing or malformed -> empty
fn parse_required(body: &serde_json::Value) -> Vec<String> {
    body.get("required")
        .and_then(serde_json::Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(serde_json::Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
