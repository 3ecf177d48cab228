//! Prediction handlers

use axum::{extract::State, Json};

use crate::models::{user_id_of, PredictResponse, PredictRows, PredictionResult, RequiredFeaturesResponse};
use crate::{pipeline, AppError, AppResult, AppState};

/// Feature columns the loaded model expects
pub async fn required_features(State(state): State<AppState>) -> Json<RequiredFeaturesResponse> {
    let required = state.model.feature_order().to_vec();
    Json(RequiredFeaturesResponse {
        count: required.len(),
        required,
    })
}

/// Score a batch of rows, one result per row in input order
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRows>,
) -> AppResult<Json<PredictResponse>> {
    if req.rows.is_empty() {
        return Err(AppError::Validation("No rows provided".to_string()));
    }

    let features = pipeline::prepare_batch(&req.rows, state.model.feature_order())?;
    let pds = state
        .model
        .predict_proba(&features)
        .map_err(AppError::Inference)?;

    let results: Vec<PredictionResult> = req
        .rows
        .iter()
        .zip(pds)
        .map(|(row, pd)| PredictionResult::new(user_id_of(row), pd))
        .collect();

    tracing::debug!("Scored {} row(s)", results.len());

    Ok(Json(PredictResponse { results }))
}
