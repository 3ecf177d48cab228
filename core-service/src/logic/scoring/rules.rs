//! Scoring Rules & Thresholds
//!
//! Constants only. The formula itself lives in `heuristic`.

// ============================================================================
// WEIGHTS
// ============================================================================

/// Payment delay ratio (50%)
pub const DELAY_WEIGHT: f64 = 0.50;

/// Cart abandonment rate (25%)
pub const ABANDON_WEIGHT: f64 = 0.25;

/// Geo variance, scaled to [0,1] by `GEO_SCALE` (15%)
pub const GEO_WEIGHT: f64 = 0.15;

/// Average order value relative to cohort (6%)
pub const AOV_WEIGHT: f64 = 0.06;

/// Recharge amount relative to cohort (3%)
pub const RECHARGE_WEIGHT: f64 = 0.03;

/// Divisor bringing `geo_variance_score` into [0,1]
pub const GEO_SCALE: f64 = 10.0;

/// Cohort mean multiplier above which economic engagement counts as full
pub const COHORT_HEADROOM: f64 = 1.5;

// ============================================================================
// TENURE (added raw, not weighted)
// ============================================================================

pub const TENURE_NEW_MONTHS: f64 = 6.0;
pub const TENURE_YOUNG_MONTHS: f64 = 12.0;

pub const TENURE_NEW_FACTOR: f64 = 0.25;
pub const TENURE_YOUNG_FACTOR: f64 = 0.15;
pub const TENURE_ESTABLISHED_FACTOR: f64 = 0.05;

// ============================================================================
// COHORT FALLBACKS
// ============================================================================

/// Used when the cohort mean order value is missing or degenerate
pub const FALLBACK_MEAN_AOV: f64 = 1000.0;

/// Used when the cohort mean recharge amount is missing or degenerate
pub const FALLBACK_MEAN_RECHARGE: f64 = 500.0;

// ============================================================================
// RISK BANDS (PD percentage)
// ============================================================================

/// Below this = Low Risk
pub const LOW_RISK_MAX: f64 = 30.0;

/// Below this = Medium Risk, at or above = High Risk
pub const MEDIUM_RISK_MAX: f64 = 60.0;
