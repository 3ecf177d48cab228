//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
}

#[derive(Serialize)]
pub struct RootResponse {
    ok: bool,
    feature_order_known: bool,
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        ok: true,
        feature_order_known: !state.model.feature_order().is_empty(),
    })
}
