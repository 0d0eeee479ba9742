//! Projected therm savings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculator::ProgramConfigError;
use super::incentives::IncentiveRecord;

/// Deemed savings used to project annual therm reductions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsFactors {
    /// Therms saved for every half credit of gas-eligible points.
    pub therms_per_half_credit: f64,

    /// Baseline heating therms a smart thermostat acts on.
    pub thermostat_baseline_therms: f64,

    /// Fraction of the baseline a smart thermostat saves.
    pub thermostat_savings_rate: f64,

    pub fireplace_therms: f64,
}

impl Default for SavingsFactors {
    fn default() -> Self {
        Self {
            therms_per_half_credit: 34.2783728876166,
            thermostat_baseline_therms: 336.0,
            thermostat_savings_rate: 0.06,
            fireplace_therms: 18.3,
        }
    }
}

impl SavingsFactors {
    pub fn validate(&self) -> Result<(), ProgramConfigError> {
        let factors = [
            ("therms_per_half_credit", self.therms_per_half_credit),
            ("thermostat_baseline_therms", self.thermostat_baseline_therms),
            ("thermostat_savings_rate", self.thermostat_savings_rate),
            ("fireplace_therms", self.fireplace_therms),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(ProgramConfigError::InvalidFactor { name, value });
            }
        }
        Ok(())
    }

    pub fn thermostat_therms(&self) -> f64 {
        self.thermostat_baseline_therms * self.thermostat_savings_rate
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsRecord {
    pub eligible_gas_points: f64,
    pub code_based_therm_savings: f64,
    pub thermostat_therm_savings: f64,
    pub fireplace_therm_savings: f64,
    pub total_therm_savings: f64,
}

#[derive(Debug, Clone)]
pub struct SavingsCalculator {
    factors: SavingsFactors,
}

impl Default for SavingsCalculator {
    fn default() -> Self {
        Self {
            factors: SavingsFactors::default(),
        }
    }
}

impl SavingsCalculator {
    pub fn new(factors: SavingsFactors) -> Result<Self, ProgramConfigError> {
        factors.validate()?;
        Ok(Self { factors })
    }

    /// Thermostat and fireplace savings are only claimed alongside their
    /// incentive.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use wcc_core::calculations::{IncentiveRecord, SavingsCalculator, SavingsFactors};
    ///
    /// let incentives = IncentiveRecord {
    ///     code_credit_incentive: dec!(2400),
    ///     thermostat_incentive: dec!(125),
    ///     fireplace_incentive: dec!(200),
    ///     total_builder_incentive: dec!(2725),
    ///     verifier_incentive: dec!(100),
    /// };
    ///
    /// let savings = SavingsCalculator::new(SavingsFactors::default())
    ///     .unwrap()
    ///     .calculate(1.5, &incentives);
    ///
    /// assert_eq!(savings.total_therm_savings, 141.2951186628498);
    /// ```
    pub fn calculate(
        &self,
        eligible_gas_points: f64,
        incentives: &IncentiveRecord,
    ) -> SavingsRecord {
        let code_based_therm_savings =
            (self.factors.therms_per_half_credit * eligible_gas_points) / 0.5;

        let has_points = eligible_gas_points > 0.0;
        let thermostat_therm_savings =
            if has_points && incentives.thermostat_incentive > Decimal::ZERO {
                self.factors.thermostat_therms()
            } else {
                0.0
            };
        let fireplace_therm_savings =
            if has_points && incentives.fireplace_incentive > Decimal::ZERO {
                self.factors.fireplace_therms
            } else {
                0.0
            };

        SavingsRecord {
            eligible_gas_points,
            code_based_therm_savings,
            thermostat_therm_savings,
            fireplace_therm_savings,
            total_therm_savings: code_based_therm_savings
                + thermostat_therm_savings
                + fireplace_therm_savings,
        }
    }
}
