//! Built-in demo cohort (three borrowers spanning the risk bands)

use super::Dataset;
use crate::logic::value::{fields, UserRow, USER_ID};

struct DemoBorrower {
    user_id: &'static str,
    age: f64,
    location: &'static str,
    employment_type: &'static str,
    avg_recharge_amt: f64,
    recharge_freq: f64,
    sms_bank_count: f64,
    sms_upi_count: f64,
    avg_order_value: f64,
    cart_abandonment_rate: f64,
    payment_delay_ratio: f64,
    geo_variance_score: f64,
    months_active: f64,
}

const DEMO_BORROWERS: [DemoBorrower; 3] = [
    DemoBorrower {
        user_id: "U-1024",
        age: 34.0,
        location: "Bengaluru",
        employment_type: "Salaried",
        avg_recharge_amt: 799.0,
        recharge_freq: 4.0,
        sms_bank_count: 42.0,
        sms_upi_count: 65.0,
        avg_order_value: 2400.0,
        cart_abandonment_rate: 0.18,
        payment_delay_ratio: 0.12,
        geo_variance_score: 2.1,
        months_active: 18.0,
    },
    DemoBorrower {
        user_id: "U-2048",
        age: 27.0,
        location: "Pune",
        employment_type: "Self-Employed",
        avg_recharge_amt: 399.0,
        recharge_freq: 3.0,
        sms_bank_count: 21.0,
        sms_upi_count: 30.0,
        avg_order_value: 1200.0,
        cart_abandonment_rate: 0.42,
        payment_delay_ratio: 0.35,
        geo_variance_score: 4.5,
        months_active: 7.0,
    },
    DemoBorrower {
        user_id: "U-4096",
        age: 22.0,
        location: "Lucknow",
        employment_type: "Gig Worker",
        avg_recharge_amt: 149.0,
        recharge_freq: 2.0,
        sms_bank_count: 6.0,
        sms_upi_count: 9.0,
        avg_order_value: 450.0,
        cart_abandonment_rate: 0.58,
        payment_delay_ratio: 0.62,
        geo_variance_score: 7.4,
        months_active: 3.0,
    },
];

/// Demo collection replacing any uploaded one
pub fn demo_dataset() -> Dataset {
    let rows = DEMO_BORROWERS.iter().map(to_row).collect();
    Dataset::new(rows)
}

fn to_row(b: &DemoBorrower) -> UserRow {
    let mut row = UserRow::new();
    row.insert(USER_ID, b.user_id);
    row.insert(fields::AGE, b.age);
    row.insert(fields::LOCATION, b.location);
    row.insert(fields::EMPLOYMENT_TYPE, b.employment_type);
    row.insert(fields::AVG_RECHARGE_AMT, b.avg_recharge_amt);
    row.insert(fields::RECHARGE_FREQ, b.recharge_freq);
    row.insert(fields::SMS_BANK_COUNT, b.sms_bank_count);
    row.insert(fields::SMS_UPI_COUNT, b.sms_upi_count);
    row.insert(fields::AVG_ORDER_VALUE, b.avg_order_value);
    row.insert(fields::CART_ABANDONMENT_RATE, b.cart_abandonment_rate);
    row.insert(fields::PAYMENT_DELAY_RATIO, b.payment_delay_ratio);
    row.insert(fields::GEO_VARIANCE_SCORE, b.geo_variance_score);
    row.insert(fields::MONTHS_ACTIVE, b.months_active);
    row
}
