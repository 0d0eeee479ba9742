use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::Summary;

/// Values stored against a home once its checklist is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub required_credits_to_meet_code: u8,
    pub achieved_total_credits: f64,
    pub eligible_gas_points: f64,
    pub therm_savings: f64,

    // Incentives
    #[serde(with = "rust_decimal::serde::float")]
    pub code_credit_incentive: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub thermostat_incentive: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fireplace_incentive: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub builder_incentive: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rater_incentive: Decimal,
}

impl From<&Summary> for SubmissionRecord {
    fn from(summary: &Summary) -> Self {
        Self {
            required_credits_to_meet_code: summary.required_credits_to_meet_code,
            achieved_total_credits: summary.achieved_total_credits,
            eligible_gas_points: summary.eligible_gas_points,
            therm_savings: summary.total_therm_savings,
            code_credit_incentive: summary.code_credit_incentive,
            thermostat_incentive: summary.thermostat_incentive,
            fireplace_incentive: summary.fireplace_incentive,
            builder_incentive: summary.total_builder_incentive,
            rater_incentive: summary.verifier_incentive,
        }
    }
}
