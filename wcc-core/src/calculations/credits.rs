//! Credit aggregation across the eight worksheet categories.
//!
//! Each category contributes an *eligible* value straight from the catalog
//! and an *achieved* value. Achieved mirrors eligible for every category
//! except water heating, which is only achieved when the water heater
//! requirements are met.
//!
//! A single `None` anywhere zeroes both totals. Reports show these entries
//! as `DNQ` (does not qualify).

use serde::Serialize;
use tracing::{debug, warn};

use super::specifications::Specifications;
use crate::catalog;
use crate::models::OptionSelections;

/// Eligible and achieved credits for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CreditEntry {
    pub eligible: Option<f64>,
    pub achieved: Option<f64>,
}

impl CreditEntry {
    fn mirrored(eligible: Option<f64>) -> Self {
        Self {
            eligible,
            achieved: eligible,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CreditTotals {
    pub eligible: f64,
    pub achieved: f64,
}

/// Per-category credits plus totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditLedger {
    pub building_envelope: CreditEntry,
    pub air_leakage: CreditEntry,
    pub hvac: CreditEntry,
    pub hvac_distribution: CreditEntry,
    pub dwhr: CreditEntry,
    pub water_heater: CreditEntry,
    pub renewables: CreditEntry,
    pub appliances: CreditEntry,
    pub total: CreditTotals,
}

impl CreditLedger {
    /// Display label and entry for each category, in worksheet order.
    pub fn entries(&self) -> [(&'static str, &CreditEntry); 8] {
        [
            ("Building Envelope", &self.building_envelope),
            ("Air Leakage", &self.air_leakage),
            ("HVAC", &self.hvac),
            ("HVAC Distribution", &self.hvac_distribution),
            ("DWHR", &self.dwhr),
            ("Water Heater", &self.water_heater),
            ("Renewables", &self.renewables),
            ("Appliances", &self.appliances),
        ]
    }

    /// True when any category does not qualify.
    pub fn is_disqualified(&self) -> bool {
        self.entries()
            .iter()
            .any(|(_, e)| e.eligible.is_none() || e.achieved.is_none())
    }
}

/// Folds the option catalog and the graded categories into a
/// [`CreditLedger`].
#[derive(Debug, Clone, Copy)]
pub struct CreditAggregator {
    options: OptionSelections,
}

impl CreditAggregator {
    pub fn new(options: OptionSelections) -> Self {
        Self { options }
    }

    pub fn calculate(
        &self,
        specifications: &Specifications,
    ) -> CreditLedger {
        let options = &self.options;

        let water_heating_eligible =
            catalog::water_heating(options.water_heating_option).eligible_credits;
        let water_heater = CreditEntry {
            eligible: water_heating_eligible,
            achieved: if specifications.water.meets_water_heater_requirements {
                water_heating_eligible
            } else {
                None
            },
        };

        let entries = [
            CreditEntry::mirrored(catalog::envelope(options.envelope_option).eligible_credits),
            CreditEntry::mirrored(catalog::air_leakage(options.air_leakage_option).eligible_credits),
            CreditEntry::mirrored(catalog::hvac(options.hvac_option).eligible_credits),
            CreditEntry::mirrored(
                catalog::hvac_distribution(options.hvac_distribution_option).eligible_credits,
            ),
            CreditEntry::mirrored(catalog::dwhr(options.dwhr_option).eligible_credits),
            water_heater,
            CreditEntry::mirrored(catalog::renewable_energy_credits(
                options.renewable_electric_option,
            )),
            CreditEntry::mirrored(catalog::appliance_credits(options.appliance_option)),
        ];

        let total = CreditTotals {
            eligible: sum_or_zero(entries.iter().map(|e| e.eligible)),
            achieved: sum_or_zero(entries.iter().map(|e| e.achieved)),
        };

        let [
            building_envelope,
            air_leakage,
            hvac,
            hvac_distribution,
            dwhr,
            water_heater,
            renewables,
            appliances,
        ] = entries;

        let ledger = CreditLedger {
            building_envelope,
            air_leakage,
            hvac,
            hvac_distribution,
            dwhr,
            water_heater,
            renewables,
            appliances,
            total,
        };

        if ledger.is_disqualified() {
            warn!(
                eligible = total.eligible,
                achieved = total.achieved,
                "selection does not qualify for code credits"
            );
        } else {
            debug!(
                eligible = total.eligible,
                achieved = total.achieved,
                "aggregated credits"
            );
        }

        ledger
    }
}

/// Sum of every value, or zero if any value is missing.
fn sum_or_zero(values: impl Iterator<Item = Option<f64>>) -> f64 {
    values.sum::<Option<f64>>().unwrap_or(0.0)
}
