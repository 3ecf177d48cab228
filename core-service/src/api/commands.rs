//! Dashboard Commands - API for the frontend
//!
//! One `DashboardSession` per open dashboard. Every command returns control to
//! an idle, retryable state: errors are reported as messages, never fatal.

use serde::Serialize;
use std::path::Path;

use crate::logic::analyzer::{
    AnalysisOutcome, AnalysisState, Analyzer, IndividualInput,
};
use crate::logic::dataset::{demo, export, import, DatasetStats};
use crate::logic::gateway::{
    GatewayConfig, HttpBackend, PredictionGateway, RequiredFeaturesCache, ScoringBackend,
};
use crate::logic::scoring::{self, FactorBreakdown, RiskCategory, ScoreMethod};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Loaded collection overview
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub row_count: usize,
    pub columns: Vec<String>,
    pub user_ids: Vec<String>,
    pub stats: DatasetStats,
}

/// Current analysis status for the result panel
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisStatus {
    pub state: AnalysisState,
    pub result: Option<AnalysisOutcome>,
}

/// Heuristic score for one uploaded row (cohort table / charts)
#[derive(Debug, Clone, Serialize)]
pub struct HeuristicRow {
    pub user_id: String,
    pub pd_percent: f64,
    pub category: RiskCategory,
    pub label: &'static str,
    pub tone: &'static str,
    pub method: ScoreMethod,
    pub breakdown: Option<FactorBreakdown>,
}

// ============================================================================
// SESSION
// ============================================================================

pub struct DashboardSession<B: ScoringBackend = HttpBackend> {
    analyzer: Analyzer<B>,
}

impl DashboardSession<HttpBackend> {
    /// Session against the configured scoring service. All connected
    /// sessions share the process-wide required-features cache.
    pub fn connect(config: GatewayConfig) -> Result<Self, String> {
        let backend = HttpBackend::new(config).map_err(|e| e.to_string())?;
        log::info!("Scoring service: {}", backend.base_url());
        Ok(Self::new(PredictionGateway::with_cache(
            backend,
            RequiredFeaturesCache::shared(),
        )))
    }
}

impl<B: ScoringBackend> DashboardSession<B> {
    pub fn new(gateway: PredictionGateway<B>) -> Self {
        Self {
            analyzer: Analyzer::new(gateway),
        }
    }

    pub fn analyzer(&self) -> &Analyzer<B> {
        &self.analyzer
    }

    // --- Dataset Commands ---

    /// Replace the collection with a CSV upload. On a parse error the
    /// current collection stays as it was.
    pub fn load_csv(&mut self, path: impl AsRef<Path>) -> Result<DatasetSummary, String> {
        let dataset = import::read_csv_path(path.as_ref()).map_err(|e| {
            log::error!("Upload of {} rejected: {}", path.as_ref().display(), e);
            e.to_string()
        })?;
        self.analyzer.load_dataset(dataset);
        Ok(self.get_dataset_summary())
    }

    /// Replace the collection with the built-in demo rows
    pub fn load_demo(&mut self) -> DatasetSummary {
        self.analyzer.load_dataset(demo::demo_dataset());
        self.get_dataset_summary()
    }

    pub fn get_dataset_summary(&self) -> DatasetSummary {
        let dataset = self.analyzer.dataset();
        DatasetSummary {
            row_count: dataset.len(),
            columns: dataset.columns().to_vec(),
            user_ids: dataset.user_ids(),
            stats: *dataset.stats(),
        }
    }

    /// Heuristic PD for every uploaded row, in upload order
    pub fn get_heuristic_scores(&self) -> Vec<HeuristicRow> {
        let dataset = self.analyzer.dataset();
        dataset
            .rows()
            .iter()
            .map(|row| {
                let scored = scoring::score(row, dataset.stats());
                let category = RiskCategory::from_pd(scored.pd_percent);
                HeuristicRow {
                    user_id: row.user_id().unwrap_or_default(),
                    pd_percent: scored.pd_percent,
                    category,
                    label: category.label(),
                    tone: category.tone(),
                    method: scored.method,
                    breakdown: scored.breakdown,
                }
            })
            .collect()
    }

    pub fn export_dataset(&self, target_path: impl AsRef<Path>) -> Result<usize, String> {
        export::to_csv_file(self.analyzer.dataset(), target_path).map_err(|e| e.to_string())
    }

    // --- Analysis Commands ---

    pub async fn analyze_user(&mut self, user_id: Option<&str>) -> Result<AnalysisOutcome, String> {
        self.analyzer
            .analyze_selected(user_id)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn analyze_individual(
        &mut self,
        input: &IndividualInput,
    ) -> Result<AnalysisOutcome, String> {
        self.analyzer
            .analyze_individual(input)
            .await
            .map_err(|e| e.to_string())
    }

    pub fn get_analysis_status(&self) -> AnalysisStatus {
        AnalysisStatus {
            state: self.analyzer.state().clone(),
            result: self.analyzer.result().cloned(),
        }
    }

    pub async fn get_required_features(&self) -> Vec<String> {
        self.analyzer.gateway().required_features().await
    }
}
