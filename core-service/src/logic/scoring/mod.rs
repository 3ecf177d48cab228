//! Scoring Module
//!
//! Local PD estimation and risk banding.
//!
//! ## Structure
//! - `rules`: Weights, fallbacks and band thresholds
//! - `heuristic`: Deterministic PD formula used when the remote model can't be
//! - `category`: PD percentage -> Low / Medium / High

pub mod rules;
pub mod heuristic;
pub mod category;

pub use heuristic::{heuristic_pd, score, FactorBreakdown, HeuristicScore, ScoreMethod};
pub use category::RiskCategory;
