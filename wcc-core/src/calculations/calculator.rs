//! End-to-end code credit calculation for one home.
//!
//! [`CodeCreditCalculator::calculate`] runs every stage eagerly and returns
//! an immutable [`Calculation`]:
//!
//! 1. grade the five specification categories
//! 2. aggregate credits
//! 3. derive the required credits and gas-eligible points
//! 4. price builder and verifier incentives
//! 5. project therm savings
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use wcc_core::calculations::CodeCreditCalculator;
//! use wcc_core::models::*;
//!
//! let mut input = CalculatorInput::default();
//! input.options = OptionSelections {
//!     envelope_option: BuildingEnvelope::Option1p6a,
//!     air_leakage_option: AirLeakageControl::Option2p4,
//!     hvac_option: HighEfficiencyHvac::Option3p1,
//!     hvac_distribution_option: HighEfficiencyHvacDistribution::Option4p2,
//!     dwhr_option: Dwhr::Option5p1,
//!     water_heating_option: EfficientWaterHeating::Option5p6,
//!     renewable_electric_option: RenewableEnergy::Option6p1c,
//!     appliance_option: Appliances::Option7p1,
//! };
//! input.home.conditioned_floor_area = 2500.0;
//! input.home.water_heating_fuel = Some(WaterHeatingFuel::Electric);
//! input.home.thermostat_type = Some(ThermostatType::Ecobee4);
//! input.home.fireplace_efficiency = FireplaceType::From70To75;
//! input.water.electric_water_heater_uef = Some(3.5);
//!
//! let calculation = CodeCreditCalculator::default().calculate(&input);
//!
//! assert_eq!(calculation.summary.achieved_total_credits, 13.5);
//! assert_eq!(calculation.summary.eligible_gas_points, 1.5);
//! assert_eq!(calculation.summary.total_builder_incentive, dec!(2725.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::common::{required_credits_to_meet_code, round_to};
use super::credits::{CreditAggregator, CreditLedger};
use super::incentives::{IncentiveCalculator, IncentiveRates, IncentiveRecord};
use super::savings::{SavingsCalculator, SavingsFactors, SavingsRecord};
use super::specifications::Specifications;
use crate::models::{CalculatorInput, FireplaceType, ThermostatType, WaterHeatingFuel};

/// Errors raised when program rates or savings factors are invalid.
#[derive(Debug, Error, PartialEq)]
pub enum ProgramConfigError {
    #[error("{name} must be non-negative, got {value}")]
    NegativeRate { name: &'static str, value: Decimal },

    #[error("gas points cap must be between 0 and 1.5, got {0}")]
    InvalidGasPointsCap(f64),

    #[error("{name} must be a non-negative number, got {value}")]
    InvalidFactor { name: &'static str, value: f64 },
}

/// Incentive rates and savings factors for the program year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    pub incentives: IncentiveRates,
    pub savings: SavingsFactors,
}

impl ProgramConfig {
    pub fn validate(&self) -> Result<(), ProgramConfigError> {
        self.incentives.validate()?;
        self.savings.validate()
    }
}

/// Headline values for one home.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub conditioned_floor_area: f64,
    pub water_heating_fuel: Option<WaterHeatingFuel>,
    pub thermostat_type: Option<ThermostatType>,
    pub fireplace_efficiency: FireplaceType,
    pub required_credits_to_meet_code: u8,
    pub achieved_total_credits: f64,
    pub eligible_gas_points: f64,

    /// Rounded to two decimal places.
    pub total_therm_savings: f64,

    #[serde(with = "rust_decimal::serde::float")]
    pub code_credit_incentive: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub thermostat_incentive: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fireplace_incentive: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_builder_incentive: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub verifier_incentive: Decimal,
}

/// Every derived value for one home.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub input: CalculatorInput,

    #[serde(rename = "summary_data")]
    pub summary: Summary,

    #[serde(rename = "credit_data")]
    pub credits: CreditLedger,

    #[serde(rename = "incentive_data")]
    pub incentives: IncentiveRecord,

    #[serde(rename = "savings_data")]
    pub savings: SavingsRecord,

    #[serde(rename = "specification_data")]
    pub specifications: Specifications,
}

impl Calculation {
    /// Every specification warning, prefixed with its category title.
    pub fn warnings(&self) -> Vec<String> {
        self.specifications
            .categories()
            .iter()
            .flat_map(|category| {
                category
                    .warnings()
                    .map(move |warning| format!("{}: {warning}", category.title))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeCreditCalculator {
    incentives: IncentiveCalculator,
    savings: SavingsCalculator,
}

impl CodeCreditCalculator {
    /// # Errors
    ///
    /// Returns [`ProgramConfigError`] if any rate or factor is invalid.
    pub fn new(config: ProgramConfig) -> Result<Self, ProgramConfigError> {
        Ok(Self {
            incentives: IncentiveCalculator::new(config.incentives)?,
            savings: SavingsCalculator::new(config.savings)?,
        })
    }

    pub fn calculate(
        &self,
        input: &CalculatorInput,
    ) -> Calculation {
        let home = &input.home;

        let specifications = Specifications::evaluate(input);
        let credits = CreditAggregator::new(input.options).calculate(&specifications);
        let required_credits = required_credits_to_meet_code(home.conditioned_floor_area);
        let eligible_gas_points = self.incentives.eligible_gas_points(
            &credits,
            required_credits,
            home.water_heating_fuel,
        );
        let incentives = self.incentives.calculate(
            eligible_gas_points,
            home.thermostat_type,
            home.fireplace_efficiency,
        );
        let savings = self.savings.calculate(eligible_gas_points, &incentives);

        let summary = Summary {
            conditioned_floor_area: home.conditioned_floor_area,
            water_heating_fuel: home.water_heating_fuel,
            thermostat_type: home.thermostat_type,
            fireplace_efficiency: home.fireplace_efficiency,
            required_credits_to_meet_code: required_credits,
            achieved_total_credits: credits.total.achieved,
            eligible_gas_points,
            total_therm_savings: round_to(savings.total_therm_savings, 2),
            code_credit_incentive: incentives.code_credit_incentive,
            thermostat_incentive: incentives.thermostat_incentive,
            fireplace_incentive: incentives.fireplace_incentive,
            total_builder_incentive: incentives.total_builder_incentive,
            verifier_incentive: incentives.verifier_incentive,
        };

        info!(
            required_credits,
            achieved = summary.achieved_total_credits,
            eligible_gas_points,
            builder_incentive = %summary.total_builder_incentive,
            "calculated code credits"
        );

        Calculation {
            input: input.clone(),
            summary,
            credits,
            incentives,
            savings,
            specifications,
        }
    }
}
