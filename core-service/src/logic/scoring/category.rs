//! Risk Categorizer
//!
//! PD percentage -> three-band label. Boundaries belong to the upper band:
//! 29.999 is Low, 30 is Medium, 60 is High.

use serde::{Deserialize, Serialize};

use super::rules::{LOW_RISK_MAX, MEDIUM_RISK_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    /// Band for a PD percentage. NaN lands in High.
    pub fn from_pd(pd_percent: f64) -> Self {
        if pd_percent < LOW_RISK_MAX {
            RiskCategory::Low
        } else if pd_percent < MEDIUM_RISK_MAX {
            RiskCategory::Medium
        } else {
            RiskCategory::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Medium => "Medium Risk",
            RiskCategory::High => "High Risk",
        }
    }

    /// Display tone for the presentation layer
    pub fn tone(&self) -> &'static str {
        match self {
            RiskCategory::Low => "success",
            RiskCategory::Medium => "warning",
            RiskCategory::High => "danger",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskCategory::Low => "#10b981",    // Green
            RiskCategory::Medium => "#f59e0b", // Yellow
            RiskCategory::High => "#ef4444",   // Red
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskCategory::from_pd(0.0), RiskCategory::Low);
        assert_eq!(RiskCategory::from_pd(29.999), RiskCategory::Low);
        assert_eq!(RiskCategory::from_pd(30.0), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_pd(59.999), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_pd(60.0), RiskCategory::High);
        assert_eq!(RiskCategory::from_pd(100.0), RiskCategory::High);
    }

    #[test]
    fn test_labels_and_tones() {
        assert_eq!(RiskCategory::Low.label(), "Low Risk");
        assert_eq!(RiskCategory::Medium.tone(), "warning");
        assert_eq!(RiskCategory::High.to_string(), "High Risk");
    }
}
