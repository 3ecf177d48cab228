//! FinShield Scoring Server
//!
//! Applies a logistic scorecard to borrower rows posted by the dashboard.
//!
//! # Request flow
//!
//! ```text
//! POST /predict {rows}
//!   │
//!   ├─ drop labels, normalize cells      (pipeline)
//!   ├─ project onto feature order, cast  (pipeline)
//!   ├─ PD per row                        (models::scorecard)
//!   └─ band + credit score               (models::prediction)
//! ```

mod config;
mod error;
mod handlers;
mod models;
mod pipeline;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use models::ScoringModel;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "finshield_scoring=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("FinShield Scoring Server starting...");

    let model = ScoringModel::load(&config.model_path)
        .with_context(|| format!("loading model from {}", config.model_path))?;
    tracing::info!(
        "Model loaded from {} ({} features)",
        config.model_path,
        model.feature_order().len()
    );

    let state = AppState {
        model: Arc::new(model),
    };

    let app = create_router(state);

    let addr = SocketAddr::from((config.host, config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<ScoringModel>,
}

/// Create the router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/required_features", get(handlers::predict::required_features))
        .route("/predict", post(handlers::predict::predict))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
