//! Analyzer Orchestrator
//!
//! Decides per request whether a borrower is scored by the remote model or by
//! the local heuristic, and tracks `idle -> loading -> {success, error}`.
//!
//! - rows from the uploaded collection go to the Prediction Gateway
//! - unknown individual ids become synthetic rows scored locally only
//!
//! `run` holds `&mut self` across the await, so one orchestrator can never
//! have two analyses in flight.

pub mod request;
pub mod synthetic;

pub use request::{AnalysisRequest, IndividualInput};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::dataset::Dataset;
use super::gateway::{GatewayError, PredictionGateway, ScoringBackend};
use super::scoring::{self, RiskCategory};
use super::value::UserRow;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum AnalysisState {
    Idle,
    Loading,
    Success,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Remote,
    Heuristic,
}

/// What the dashboard displays for one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub user_id: String,
    /// PD percentage, 0-100
    pub pd_percent: f64,
    pub category: RiskCategory,
    pub source: ScoreSource,
    pub summary: String,
    pub risk_band: Option<String>,
    pub credit_score: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// Nothing selected / empty id; no call attempted
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

pub struct Analyzer<B, R = StdRng> {
    gateway: PredictionGateway<B>,
    dataset: Dataset,
    state: AnalysisState,
    result: Option<AnalysisOutcome>,
    rng: R,
}

impl<B: ScoringBackend> Analyzer<B, StdRng> {
    pub fn new(gateway: PredictionGateway<B>) -> Self {
        Self::with_rng(gateway, StdRng::from_entropy())
    }
}

impl<B: ScoringBackend, R: Rng> Analyzer<B, R> {
    /// Orchestrator with an explicit placeholder generator
    pub fn with_rng(gateway: PredictionGateway<B>, rng: R) -> Self {
        Self {
            gateway,
            dataset: Dataset::empty(),
            state: AnalysisState::Idle,
            result: None,
            rng,
        }
    }

    pub fn gateway(&self) -> &PredictionGateway<B> {
        &self.gateway
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Swap in a new collection; the old one is dropped whole
    pub fn load_dataset(&mut self, dataset: Dataset) {
        log::info!("Dataset replaced ({} rows)", dataset.len());
        self.dataset = dataset;
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == AnalysisState::Loading
    }

    /// Last successful outcome; failed analyses never overwrite it
    pub fn result(&self) -> Option<&AnalysisOutcome> {
        self.result.as_ref()
    }

    /// Analyze the user selected from the uploaded collection
    pub async fn analyze_selected(
        &mut self,
        selected: Option<&str>,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let Some(user_id) = selected.map(str::trim).filter(|id| !id.is_empty()) else {
            return self.reject("Select a user from the uploaded dataset first".to_string());
        };
        let Some(row) = self.dataset.find(user_id).cloned() else {
            return self.reject(format!("User {} is not in the uploaded dataset", user_id));
        };

        self.run(AnalysisRequest::ExistingRow(row)).await
    }

    /// Analyze by id: known ids use their uploaded row, unknown ids a
    /// synthetic one
    pub async fn analyze_individual(
        &mut self,
        input: &IndividualInput,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        if input.user_id.trim().is_empty() {
            return self.reject("Enter a user id to analyze".to_string());
        }

        let request = self.resolve_individual(input);
        self.run(request).await
    }

    /// Map the individual form onto a request variant
    pub fn resolve_individual(&mut self, input: &IndividualInput) -> AnalysisRequest {
        match self.dataset.find(&input.user_id) {
            Some(row) => AnalysisRequest::ExistingRow(row.clone()),
            None => {
                log::debug!("User {} not in dataset, synthesizing row", input.user_id.trim());
                AnalysisRequest::SyntheticRow(synthetic::synthesize_row(input, &mut self.rng))
            }
        }
    }

    /// Single orchestration path for every request variant
    pub async fn run(&mut self, request: AnalysisRequest) -> Result<AnalysisOutcome, AnalysisError> {
        self.transition(AnalysisState::Loading);

        let outcome = match &request {
            AnalysisRequest::ExistingRow(row) => self.score_remote(row).await,
            AnalysisRequest::SyntheticRow(row) => Ok(self.score_local(row)),
        };

        match outcome {
            Ok(outcome) => {
                self.result = Some(outcome.clone());
                self.transition(AnalysisState::Success);
                Ok(outcome)
            }
            Err(e) => {
                log::warn!("Analysis failed: {}", e);
                self.transition(AnalysisState::Error(e.to_string()));
                Err(e)
            }
        }
    }

    async fn score_remote(&self, row: &UserRow) -> Result<AnalysisOutcome, AnalysisError> {
        let row = row.without_label();
        let requested_id = row.user_id().unwrap_or_default();

        let prediction = self
            .gateway
            .predict_risk(std::slice::from_ref(&row))
            .await?
            .into_iter()
            .next()
            .ok_or(GatewayError::CountMismatch { expected: 1, actual: 0 })?;

        let pd_percent = (prediction.pd * 100.0).clamp(0.0, 100.0);
        let user_id = if prediction.user_id.is_empty() {
            requested_id
        } else {
            prediction.user_id
        };

        Ok(AnalysisOutcome {
            user_id,
            pd_percent,
            category: RiskCategory::from_pd(pd_percent),
            source: ScoreSource::Remote,
            summary: format!("{} • Score {}", prediction.risk_band, prediction.credit_score),
            risk_band: Some(prediction.risk_band),
            credit_score: Some(prediction.credit_score),
        })
    }

    fn score_local(&self, row: &UserRow) -> AnalysisOutcome {
        let pd_percent = scoring::heuristic_pd(row, self.dataset.stats());
        let category = RiskCategory::from_pd(pd_percent);

        AnalysisOutcome {
            user_id: row.user_id().unwrap_or_default(),
            pd_percent,
            category,
            source: ScoreSource::Heuristic,
            summary: format!("{} • Heuristic estimate", category.label()),
            risk_band: None,
            credit_score: None,
        }
    }

    fn reject(&mut self, message: String) -> Result<AnalysisOutcome, AnalysisError> {
        self.transition(AnalysisState::Error(message.clone()));
        Err(AnalysisError::Validation(message))
    }

    fn transition(&mut self, next: AnalysisState) {
        log::debug!("Analysis state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
