//! Calculation stages for the Washington Code Credit program.
//!
//! Specifications grade the as-built home, credits total the selected
//! options, and the incentive and savings stages turn gas-eligible points
//! into dollars and therms. [`CodeCreditCalculator`] runs them in order.

pub mod calculator;
pub mod common;
pub mod credits;
pub mod incentives;
pub mod savings;
pub mod specifications;

pub use calculator::{
    Calculation, CodeCreditCalculator, ProgramConfig, ProgramConfigError, Summary,
};
pub use credits::{CreditAggregator, CreditEntry, CreditLedger, CreditTotals};
pub use incentives::{IncentiveCalculator, IncentiveRates, IncentiveRecord};
pub use savings::{SavingsCalculator, SavingsFactors, SavingsRecord};
pub use specifications::{
    AirLeakageSpecification, CategoryCompliance, EnvelopeSpecification,
    HvacDistributionSpecification, HvacSpecification, MeasureValue, MeasureVerdict,
    Specifications, WaterCompliance, WaterSpecification,
};
