//! Logic Module - Risk scoring & data normalization pipeline
//!
//! raw upload -> `value` coercion -> `dataset` (+ cohort stats)
//! -> `analyzer` picks a row -> `gateway` (preferred) or `scoring` heuristic
//! -> `scoring::category` -> display

pub mod value;
pub mod dataset;
pub mod features;
pub mod scoring;
pub mod gateway;
pub mod analyzer;
