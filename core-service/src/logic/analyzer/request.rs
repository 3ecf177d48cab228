//! Analysis requests
//!
//! Every entry point resolves to one of two variants before orchestration:
//! a row from the uploaded collection (scored remotely) or a synthetic row
//! built from the individual-assessment form (scored locally).

use serde::Deserialize;

use crate::logic::value::{fields, Cell, UserRow, USER_ID};

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    /// Row from the uploaded collection
    ExistingRow(UserRow),
    /// Ad-hoc row for a user id absent from the collection
    SyntheticRow(UserRow),
}

impl AnalysisRequest {
    pub fn row(&self) -> &UserRow {
        match self {
            AnalysisRequest::ExistingRow(row) | AnalysisRequest::SyntheticRow(row) => row,
        }
    }
}

/// Individual-assessment form. Only demographics and recharge/SMS counters
/// are collected; behavioral risk fields are not.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndividualInput {
    pub user_id: String,
    pub age: Option<f64>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub avg_recharge_amt: Option<f64>,
    pub recharge_freq: Option<f64>,
    pub sms_bank_count: Option<f64>,
    pub sms_otp_count: Option<f64>,
    pub sms_upi_count: Option<f64>,
    pub sms_fin_txn_count: Option<f64>,
    pub sms_promotional_count: Option<f64>,
    pub sms_other_count: Option<f64>,
}

impl IndividualInput {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    /// Entered fields as a row (blank or non-finite entries skipped)
    pub fn to_row(&self) -> UserRow {
        let mut row = UserRow::new();
        row.insert(USER_ID, self.user_id.trim());

        let text = [
            (fields::LOCATION, &self.location),
            (fields::EMPLOYMENT_TYPE, &self.employment_type),
        ];
        for (field, value) in text {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                row.insert(field, Cell::Text(v.to_string()));
            }
        }

        let numbers = [
            (fields::AGE, self.age),
            (fields::AVG_RECHARGE_AMT, self.avg_recharge_amt),
            (fields::RECHARGE_FREQ, self.recharge_freq),
            (fields::SMS_BANK_COUNT, self.sms_bank_count),
            (fields::SMS_OTP_COUNT, self.sms_otp_count),
            (fields::SMS_UPI_COUNT, self.sms_upi_count),
            (fields::SMS_FIN_TXN_COUNT, self.sms_fin_txn_count),
            (fields::SMS_PROMOTIONAL_COUNT, self.sms_promotional_count),
            (fields::SMS_OTHER_COUNT, self.sms_other_count),
        ];
        for (field, value) in numbers {
            if let Some(v) = value.filter(|v| v.is_finite()) {
                row.insert(field, v);
            }
        }

        row
    }
}
