//! Configuration module

use std::env;
use std::net::IpAddr;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Scorecard coefficients (JSON)
    pub model_path: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(IpAddr::from([127, 0, 0, 1])),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "model_pipeline.json".to_string()),
        }
    }
}
