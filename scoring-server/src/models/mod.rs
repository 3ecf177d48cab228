//! Data models

pub mod prediction;
pub mod scorecard;

pub use prediction::*;
pub use scorecard::*;
