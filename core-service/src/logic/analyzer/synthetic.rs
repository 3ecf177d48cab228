//! Synthetic borrower rows
//!
//! The individual form doesn't collect the behavioral risk fields, so they
//! are filled with random placeholders. Such rows are scored locally only.

use rand::Rng;

use super::request::IndividualInput;
use crate::logic::value::{fields, UserRow};

/// Placeholder ranges (inclusive low, exclusive high)
const DELAY_RANGE: (f64, f64) = (0.0, 0.6);
const ABANDON_RANGE: (f64, f64) = (0.0, 0.7);
const GEO_RANGE: (f64, f64) = (0.0, 8.0);
const ORDER_VALUE_RANGE: (f64, f64) = (200.0, 3000.0);
const MONTHS_RANGE: (u32, u32) = (1, 37);

/// Form fields plus random placeholders for the uncollected risk fields
pub fn synthesize_row<R: Rng + ?Sized>(input: &IndividualInput, rng: &mut R) -> UserRow {
    let mut row = input.to_row();

    row.insert(fields::PAYMENT_DELAY_RATIO, round2(rng.gen_range(DELAY_RANGE.0..DELAY_RANGE.1)));
    row.insert(fields::CART_ABANDONMENT_RATE, round2(rng.gen_range(ABANDON_RANGE.0..ABANDON_RANGE.1)));
    row.insert(fields::GEO_VARIANCE_SCORE, round2(rng.gen_range(GEO_RANGE.0..GEO_RANGE.1)));
    row.insert(
        fields::AVG_ORDER_VALUE,
        rng.gen_range(ORDER_VALUE_RANGE.0..ORDER_VALUE_RANGE.1).round(),
    );
    row.insert(fields::MONTHS_ACTIVE, f64::from(rng.gen_range(MONTHS_RANGE.0..MONTHS_RANGE.1)));

    row
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_placeholders_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut input = IndividualInput::new("U-9000");
        input.age = Some(29.0);
        input.employment_type = Some("Salaried".to_string());

        for _ in 0..200 {
            let row = synthesize_row(&input, &mut rng);
            let delay = row.number(fields::PAYMENT_DELAY_RATIO);
            let abandon = row.number(fields::CART_ABANDONMENT_RATE);
            let geo = row.number(fields::GEO_VARIANCE_SCORE);
            let aov = row.number(fields::AVG_ORDER_VALUE);
            let months = row.number(fields::MONTHS_ACTIVE);

            assert!((0.0..=0.6).contains(&delay));
            assert!((0.0..=0.7).contains(&abandon));
            assert!((0.0..=8.0).contains(&geo));
            assert!((200.0..=3000.0).contains(&aov));
            assert!((1.0..=36.0).contains(&months));
            assert_eq!(row.user_id().as_deref(), Some("U-9000"));
            assert_eq!(row.number(fields::AGE), 29.0);
        }
    }

    #[test]
    fn test_entered_fields_kept_and_blanks_skipped() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut input = IndividualInput::new("U-1");
        input.avg_recharge_amt = Some(349.0);
        input.location = Some("  ".to_string());

        let row = synthesize_row(&input, &mut rng);
        assert_eq!(row.number(fields::AVG_RECHARGE_AMT), 349.0);
        assert!(!row.contains(fields::LOCATION));
    }
}
