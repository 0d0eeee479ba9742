//! Gas-eligible points and dollar incentives.
//!
//! # Gas-eligible points
//!
//! Only above-code credit that gas utilities can claim is counted. Starting
//! from the achieved total:
//!
//! | Step | Rule |
//! |------|------|
//! | 1 | Zero if the achieved total is below the required credits |
//! | 2 | Subtract achieved appliance, renewable, HVAC and water heating credits |
//! | 3 | Subtract achieved DWHR credits when water heating is electric |
//! | 4 | Cap at the credits above code and at the program cap (1.5) |
//!
//! # Incentives
//!
//! | Incentive | Amount |
//! |-----------|--------|
//! | Code credit | points × multiplier × credit rate |
//! | Thermostat | flat, smart thermostat and a code credit incentive |
//! | Fireplace | flat, high efficiency fireplace and a code credit incentive |
//! | Verifier | flat, whenever the builder total is nonzero |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use wcc_core::calculations::{IncentiveCalculator, IncentiveRates};
//! use wcc_core::models::{FireplaceType, ThermostatType};
//!
//! let calculator = IncentiveCalculator::new(IncentiveRates::default()).unwrap();
//! let record = calculator.calculate(
//!     1.5,
//!     Some(ThermostatType::Ecobee4),
//!     FireplaceType::From70To75,
//! );
//!
//! assert_eq!(record.code_credit_incentive, dec!(2400.00));
//! assert_eq!(record.total_builder_incentive, dec!(2725.00));
//! assert_eq!(record.verifier_incentive, dec!(100.00));
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::calculator::ProgramConfigError;
use super::common::round_half_up;
use super::credits::CreditLedger;
use crate::models::{FireplaceType, ThermostatType, WaterHeatingFuel};

/// Program ceiling on gas-eligible points. A configured cap may lower it,
/// never raise it.
pub const MAX_GAS_POINTS: f64 = 1.5;

/// Dollar rates and caps for the incentive program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncentiveRates {
    /// Dollars paid per credit after the multiplier.
    pub credit_rate: Decimal,

    pub credit_multiplier: Decimal,

    /// Upper bound on gas-eligible points.
    pub gas_points_cap: f64,

    pub thermostat: Decimal,
    pub fireplace: Decimal,
    pub verifier: Decimal,
}

impl Default for IncentiveRates {
    fn default() -> Self {
        Self {
            credit_rate: dec!(800.00),
            credit_multiplier: dec!(2),
            gas_points_cap: 1.5,
            thermostat: dec!(125.00),
            fireplace: dec!(200.00),
            verifier: dec!(100.00),
        }
    }
}

impl IncentiveRates {
    /// Rejects negative rates and a points cap outside `0..=MAX_GAS_POINTS`.
    pub fn validate(&self) -> Result<(), ProgramConfigError> {
        let rates = [
            ("credit_rate", self.credit_rate),
            ("credit_multiplier", self.credit_multiplier),
            ("thermostat", self.thermostat),
            ("fireplace", self.fireplace),
            ("verifier", self.verifier),
        ];
        for (name, value) in rates {
            if value < Decimal::ZERO {
                return Err(ProgramConfigError::NegativeRate { name, value });
            }
        }
        if !(0.0..=MAX_GAS_POINTS).contains(&self.gas_points_cap) {
            return Err(ProgramConfigError::InvalidGasPointsCap(self.gas_points_cap));
        }
        Ok(())
    }
}

/// Builder and verifier incentives for one home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncentiveRecord {
    #[serde(with = "rust_decimal::serde::float")]
    pub code_credit_incentive: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub thermostat_incentive: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub fireplace_incentive: Decimal,

    /// Code credit, thermostat and fireplace incentives combined.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_builder_incentive: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub verifier_incentive: Decimal,
}

#[derive(Debug, Clone)]
pub struct IncentiveCalculator {
    rates: IncentiveRates,
}

impl Default for IncentiveCalculator {
    fn default() -> Self {
        Self {
            rates: IncentiveRates::default(),
        }
    }
}

impl IncentiveCalculator {
    /// # Errors
    ///
    /// Returns [`ProgramConfigError`] if the rates fail validation.
    pub fn new(rates: IncentiveRates) -> Result<Self, ProgramConfigError> {
        rates.validate()?;
        Ok(Self { rates })
    }

    pub fn rates(&self) -> &IncentiveRates {
        &self.rates
    }

    /// Above-code credit attributable to gas measures, between zero and the
    /// program cap.
    pub fn eligible_gas_points(
        &self,
        credits: &CreditLedger,
        required_credits: u8,
        fuel: Option<WaterHeatingFuel>,
    ) -> f64 {
        let achieved_total = credits.total.achieved;
        let required = f64::from(required_credits);
        if achieved_total < required {
            debug!(achieved_total, required, "below code, no gas points");
            return 0.0;
        }

        let mut value = achieved_total;
        for entry in [
            &credits.appliances,
            &credits.renewables,
            &credits.hvac,
            &credits.water_heater,
        ] {
            value -= achieved_or_zero(entry.achieved);
        }
        if fuel == Some(WaterHeatingFuel::Electric) {
            value -= achieved_or_zero(credits.dwhr.achieved);
        }

        let basic = achieved_total - required;
        let points = self.rates.gas_points_cap.min(value.min(basic));
        debug!(value, basic, points, "derived gas points");
        points
    }

    pub fn calculate(
        &self,
        eligible_gas_points: f64,
        thermostat: Option<ThermostatType>,
        fireplace: FireplaceType,
    ) -> IncentiveRecord {
        let code_credit_incentive = self.code_credit_incentive(eligible_gas_points);
        let thermostat_incentive = self.thermostat_incentive(thermostat, code_credit_incentive);
        let fireplace_incentive =
            self.fireplace_incentive(eligible_gas_points, fireplace, code_credit_incentive);
        let total_builder_incentive =
            code_credit_incentive + thermostat_incentive + fireplace_incentive;

        IncentiveRecord {
            code_credit_incentive,
            thermostat_incentive,
            fireplace_incentive,
            total_builder_incentive,
            verifier_incentive: self.verifier_incentive(total_builder_incentive),
        }
    }

    /// Points × multiplier × rate, rounded to cents.
    fn code_credit_incentive(
        &self,
        eligible_gas_points: f64,
    ) -> Decimal {
        let points = Decimal::from_f64(eligible_gas_points).unwrap_or(Decimal::ZERO);
        round_half_up(points * self.rates.credit_multiplier * self.rates.credit_rate)
    }

    fn thermostat_incentive(
        &self,
        thermostat: Option<ThermostatType>,
        code_credit_incentive: Decimal,
    ) -> Decimal {
        let smart = thermostat.is_some_and(|t| t.is_smart());
        if smart && code_credit_incentive > Decimal::ZERO {
            self.rates.thermostat
        } else {
            Decimal::ZERO
        }
    }

    fn fireplace_incentive(
        &self,
        eligible_gas_points: f64,
        fireplace: FireplaceType,
        code_credit_incentive: Decimal,
    ) -> Decimal {
        if eligible_gas_points != 0.0
            && fireplace.is_high_efficiency()
            && code_credit_incentive > Decimal::ZERO
        {
            self.rates.fireplace
        } else {
            Decimal::ZERO
        }
    }

    fn verifier_incentive(
        &self,
        total_builder_incentive: Decimal,
    ) -> Decimal {
        if total_builder_incentive.is_zero() {
            Decimal::ZERO
        } else {
            self.rates.verifier
        }
    }
}

fn achieved_or_zero(achieved: Option<f64>) -> f64 {
    achieved.unwrap_or(0.0)
}
