//! Heuristic PD Scorer
//!
//! Deterministic stand-in for the remote model. Output is a PD percentage in
//! [0, 100] for any finite input.
//!
//! Lower order value and recharge amount relative to the cohort signal weaker
//! economic engagement (higher risk). Short tenure is added on top of the
//! weighted behavioral terms.

use serde::Serialize;

use super::rules::*;
use crate::logic::dataset::DatasetStats;
use crate::logic::value::{fields, UserRow};

/// How the PD was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMethod {
    /// Row already carried `pd_score` / `prediction_proba`
    Direct,
    /// Weighted behavioral formula
    Formula,
}

/// Weighted contribution of each factor (fractions, before x100)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FactorBreakdown {
    pub delay: f64,
    pub abandon: f64,
    pub geo: f64,
    pub order_value: f64,
    pub recharge: f64,
    pub tenure: f64,
}

impl FactorBreakdown {
    pub fn total(&self) -> f64 {
        self.delay + self.abandon + self.geo + self.order_value + self.recharge + self.tenure
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeuristicScore {
    /// PD percentage, 0-100
    pub pd_percent: f64,
    pub method: ScoreMethod,
    /// Present only for `ScoreMethod::Formula`
    pub breakdown: Option<FactorBreakdown>,
}

/// PD percentage for `row` against its cohort
pub fn heuristic_pd(row: &UserRow, stats: &DatasetStats) -> f64 {
    score(row, stats).pd_percent
}

/// Full heuristic result with factor breakdown
pub fn score(row: &UserRow, stats: &DatasetStats) -> HeuristicScore {
    if let Some(direct) = direct_score(row) {
        return HeuristicScore {
            pd_percent: direct,
            method: ScoreMethod::Direct,
            breakdown: None,
        };
    }

    let breakdown = factors(row, stats);
    HeuristicScore {
        pd_percent: clamp_percent(breakdown.total() * 100.0),
        method: ScoreMethod::Formula,
        breakdown: Some(breakdown),
    }
}

/// Precomputed score, if the row carries a positive one.
/// Values <= 1 are fractions and get scaled to a percentage.
fn direct_score(row: &UserRow) -> Option<f64> {
    [fields::PD_SCORE, fields::PREDICTION_PROBA]
        .iter()
        .map(|field| row.number(field))
        .find(|value| *value > 0.0)
        .map(|value| {
            let percent = if value <= 1.0 { value * 100.0 } else { value };
            clamp_percent(percent)
        })
}

fn factors(row: &UserRow, stats: &DatasetStats) -> FactorBreakdown {
    let delay = unit(row.number(fields::PAYMENT_DELAY_RATIO));
    let abandon = unit(row.number(fields::CART_ABANDONMENT_RATE));
    let geo = unit(row.number(fields::GEO_VARIANCE_SCORE) / GEO_SCALE);

    let mean_aov = positive_or(stats.mean_aov, FALLBACK_MEAN_AOV);
    let aov = row.number_opt(fields::AVG_ORDER_VALUE).unwrap_or(mean_aov);
    let aov_factor = unit(1.0 - aov / (mean_aov * COHORT_HEADROOM));

    let mean_recharge = positive_or(stats.mean_recharge, FALLBACK_MEAN_RECHARGE);
    let recharge = row.number_opt(fields::AVG_RECHARGE_AMT).unwrap_or(mean_recharge);
    let recharge_factor = unit(1.0 - recharge / (mean_recharge * COHORT_HEADROOM));

    FactorBreakdown {
        delay: delay * DELAY_WEIGHT,
        abandon: abandon * ABANDON_WEIGHT,
        geo: geo * GEO_WEIGHT,
        order_value: aov_factor * AOV_WEIGHT,
        recharge: recharge_factor * RECHARGE_WEIGHT,
        tenure: tenure_factor(row.number(fields::MONTHS_ACTIVE)),
    }
}

fn tenure_factor(months_active: f64) -> f64 {
    if months_active < TENURE_NEW_MONTHS {
        TENURE_NEW_FACTOR
    } else if months_active < TENURE_YOUNG_MONTHS {
        TENURE_YOUNG_FACTOR
    } else {
        TENURE_ESTABLISHED_FACTOR
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, f64)]) -> UserRow {
        let mut row = UserRow::new();
        for (k, v) in pairs {
            row.insert(*k, *v);
        }
        row
    }

    fn cohort() -> DatasetStats {
        DatasetStats {
            mean_aov: 1350.0,
            mean_recharge: 449.0,
        }
    }

    #[test]
    fn test_direct_fraction_is_scaled() {
        let pd = heuristic_pd(&row(&[("pd_score", 0.42)]), &cohort());
        assert!((pd - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_direct_percentage_is_not_scaled() {
        let pd = heuristic_pd(&row(&[("pd_score", 75.0)]), &cohort());
        assert_eq!(pd, 75.0);
    }

    #[test]
    fn test_direct_uses_prediction_proba_and_clamps() {
        let scored = score(&row(&[("prediction_proba", 250.0)]), &cohort());
        assert_eq!(scored.method, ScoreMethod::Direct);
        assert_eq!(scored.pd_percent, 100.0);
        assert!(scored.breakdown.is_none());

        let mut text = UserRow::new();
        text.insert("prediction_proba", "0.5");
        assert_eq!(heuristic_pd(&text, &cohort()), 50.0);
    }

    #[test]
    fn test_zero_direct_score_falls_through() {
        let scored = score(&row(&[("pd_score", 0.0), ("months_active", 24.0)]), &cohort());
        assert_eq!(scored.method, ScoreMethod::Formula);
    }

    #[test]
    fn test_formula_matches_weights() {
        let r = row(&[
            ("payment_delay_ratio", 0.35),
            ("cart_abandonment_rate", 0.42),
            ("geo_variance_score", 4.5),
            ("months_active", 7.0),
            ("avg_order_value", 1200.0),
            ("avg_recharge_amt", 399.0),
        ]);
        let expected = 0.35 * 0.5
            + 0.42 * 0.25
            + 0.45 * 0.15
            + (1.0 - 1200.0 / (1350.0 * 1.5)) * 0.06
            + (1.0 - 399.0 / (449.0 * 1.5)) * 0.03
            + 0.15;
        let pd = heuristic_pd(&r, &cohort());
        assert!((pd - expected * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_output_bounded_for_extremes() {
        let extremes = [
            row(&[("avg_order_value", 0.0), ("months_active", 0.0)]),
            row(&[]),
            row(&[
                ("payment_delay_ratio", 1.0),
                ("cart_abandonment_rate", 1.0),
                ("geo_variance_score", 1e9),
                ("avg_order_value", 0.0),
                ("avg_recharge_amt", 0.0),
                ("months_active", 0.0),
            ]),
            row(&[
                ("payment_delay_ratio", 1e12),
                ("avg_order_value", 1e12),
                ("avg_recharge_amt", -5.0),
            ]),
            row(&[("payment_delay_ratio", -1e12)]),
        ];
        for stats in [cohort(), DatasetStats::default()] {
            for r in &extremes {
                let pd = heuristic_pd(r, &stats);
                assert!((0.0..=100.0).contains(&pd), "pd {} out of range", pd);
            }
        }
    }

    #[test]
    fn test_ratios_clamped_to_unit_range() {
        let base = [("months_active", 24.0), ("avg_order_value", 1350.0), ("avg_recharge_amt", 449.0)];
        let engagement = (1.0 - 1.0 / 1.5) * 0.06 + (1.0 - 1.0 / 1.5) * 0.03 + 0.05;

        // "35%" coerces to 35, which counts as a full ratio
        let mut percent = row(&base);
        percent.insert("payment_delay_ratio", "35%");
        percent.insert("cart_abandonment_rate", 4.0);
        let pd = heuristic_pd(&percent, &cohort());
        assert!((pd - (0.5 + 0.25 + engagement) * 100.0).abs() < 1e-9);

        let mut negative = row(&base);
        negative.insert("payment_delay_ratio", -0.5);
        negative.insert("cart_abandonment_rate", -2.0);
        let pd = heuristic_pd(&negative, &cohort());
        assert!((pd - engagement * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_cohort_uses_fallbacks() {
        // aov == fallback mean, recharge == fallback mean -> both factors 1 - 1/1.5
        let r = row(&[
            ("avg_order_value", 1000.0),
            ("avg_recharge_amt", 500.0),
            ("months_active", 24.0),
        ]);
        let expected = (1.0 - 1.0 / 1.5) * 0.06 + (1.0 - 1.0 / 1.5) * 0.03 + 0.05;
        let pd = heuristic_pd(&r, &DatasetStats::default());
        assert!((pd - expected * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_tenure_steps() {
        assert_eq!(tenure_factor(0.0), 0.25);
        assert_eq!(tenure_factor(5.9), 0.25);
        assert_eq!(tenure_factor(6.0), 0.15);
        assert_eq!(tenure_factor(11.9), 0.15);
        assert_eq!(tenure_factor(12.0), 0.05);
    }
}
