//! Central Configuration Constants
//!
//! Single source of truth for configuration defaults.
//! Environment variables override them at runtime.

/// Default scoring service URL
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Default HTTP timeout for scoring calls (seconds)
pub const DEFAULT_API_TIMEOUT: u64 = 30;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "FinShield";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get scoring service base URL from environment or use default
pub fn get_api_base() -> String {
    std::env::var("FINSHIELD_API_BASE")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(|s| normalize_base_url(&s))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Get scoring request timeout from environment or use default
pub fn get_api_timeout() -> u64 {
    std::env::var("FINSHIELD_API_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_API_TIMEOUT)
}

/// Trim whitespace and trailing slashes so paths can be appended
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
