//! Drain water heat recovery and efficient water heating (worksheet section
//! 5).
//!
//! Both options are graded together because the water heater checks depend
//! on the home's declared fuel:
//!
//! - The gas UEF verdict applies only to gas homes and is reported without
//!   gating compliance.
//! - The electric UEF verdict applies only to electric homes and does gate
//!   compliance.
//! - Fuel alignment requires the selected option to be one the declared fuel
//!   allows. An unset fuel is never aligned.

use serde::Serialize;
use tracing::{debug, warn};

use super::{CategoryCompliance, MeasureValue, MeasureVerdict, presence};
use crate::catalog::{self, DwhrRequirements, WaterHeatingRequirements};
use crate::models::{Dwhr, EfficientWaterHeating, WaterHeatingFuel, WaterMeasures, YesNo};

const TITLE: &str = "5. Efficient Water Heating";
const DWHR: &str = "Drain Water Heat Recovery";
const WATER_HEATER: &str = "Water Heater";

/// Water category verdict plus the water-heater-only flag used by the
/// credit aggregator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterCompliance {
    #[serde(flatten)]
    pub compliance: CategoryCompliance,

    /// Fuel alignment and electric UEF both pass. DWHR is not part of it.
    pub meets_water_heater_requirements: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct WaterSpecification {
    dwhr_option: Dwhr,
    water_heating_option: EfficientWaterHeating,
    fuel: Option<WaterHeatingFuel>,
    dwhr: &'static DwhrRequirements,
    water_heating: &'static WaterHeatingRequirements,
}

impl WaterSpecification {
    pub fn new(
        dwhr_option: Dwhr,
        water_heating_option: EfficientWaterHeating,
        fuel: Option<WaterHeatingFuel>,
    ) -> Self {
        Self {
            dwhr_option,
            water_heating_option,
            fuel,
            dwhr: catalog::dwhr(dwhr_option),
            water_heating: catalog::water_heating(water_heating_option),
        }
    }

    pub fn evaluate(
        &self,
        measures: &WaterMeasures,
    ) -> WaterCompliance {
        let dwhr = self.dwhr_installed(measures.dwhr_installed);
        let gas_uef = self.gas_water_heater_uef(measures.gas_water_heater_uef);
        let electric_uef = self.electric_water_heater_uef(measures.electric_water_heater_uef);
        let alignment = self.fuel_alignment();

        let meets_water_heater_requirements =
            alignment.meets_requirement && electric_uef.meets_requirement;
        let meet_requirements = dwhr.meets_requirement && meets_water_heater_requirements;
        debug!(
            dwhr = self.dwhr_option.key(),
            water_heating = self.water_heating_option.key(),
            meets_water_heater_requirements,
            meet_requirements,
            "evaluated water"
        );

        WaterCompliance {
            compliance: CategoryCompliance {
                title: TITLE,
                options_selected: vec![
                    self.dwhr_option.as_str(),
                    self.water_heating_option.as_str(),
                ],
                measures: vec![
                    dwhr,
                    presence(
                        "water_heater_brand",
                        WATER_HEATER,
                        "Water Heater Brand",
                        measures.water_heater_brand.as_deref(),
                    ),
                    presence(
                        "water_heater_model",
                        WATER_HEATER,
                        "Water Heater Model",
                        measures.water_heater_model.as_deref(),
                    ),
                    gas_uef,
                    electric_uef,
                    alignment,
                ],
                meet_requirements,
            },
            meets_water_heater_requirements,
        }
    }

    fn dwhr_installed(
        &self,
        installed: Option<YesNo>,
    ) -> MeasureVerdict {
        let target = self.dwhr.dwhr_installed;
        let meets = target.is_none() || installed == Some(YesNo::Yes);
        let warning = (!meets).then(|| "Drain water heat recovery is required.".to_string());

        MeasureVerdict::new("dwhr_installed", DWHR, "DWHR Installed")
            .minimum(target.map(|t| t.as_str()))
            .installed(installed.map(|i| i.as_str()))
            .meets(meets)
            .warn(warning)
    }

    fn gas_water_heater_uef(
        &self,
        installed: Option<f64>,
    ) -> MeasureVerdict {
        let verdict = MeasureVerdict::new("gas_water_heater_uef", WATER_HEATER, "Gas UEF");
        self.uef_verdict(
            verdict,
            WaterHeatingFuel::Gas,
            self.water_heating.gas_water_heater_uef,
            installed,
        )
    }

    fn electric_water_heater_uef(
        &self,
        installed: Option<f64>,
    ) -> MeasureVerdict {
        let verdict =
            MeasureVerdict::new("electric_water_heater_uef", WATER_HEATER, "Electric UEF");
        self.uef_verdict(
            verdict,
            WaterHeatingFuel::Electric,
            self.water_heating.electric_water_heater_uef,
            installed,
        )
    }

    /// Shared UEF rules. A UEF for the other fuel is accepted but flagged.
    fn uef_verdict(
        &self,
        verdict: MeasureVerdict,
        applies_to: WaterHeatingFuel,
        target: Option<f64>,
        installed: Option<f64>,
    ) -> MeasureVerdict {
        let verdict = verdict.installed(installed);

        if self.fuel != Some(applies_to) {
            return match installed {
                None => verdict.minimum(target),
                Some(_) => verdict.minimum("N/A").warn(Some(format!(
                    "{applies_to} UEF does not apply to {} water heating.",
                    fuel_label(self.fuel)
                ))),
            };
        }

        let verdict = verdict.minimum(target);
        match (installed, target) {
            (_, None) => verdict,
            (None, Some(_)) => verdict.meets(false),
            (Some(uef), Some(minimum)) if uef >= minimum => verdict,
            (Some(uef), Some(minimum)) => verdict.meets(false).warn(Some(format!(
                "{applies_to} UEF of {uef} is below the {minimum} minimum."
            ))),
        }
    }

    fn fuel_alignment(&self) -> MeasureVerdict {
        let option = self.water_heating_option;
        let aligned = self
            .fuel
            .is_some_and(|fuel| catalog::water_heating_options_for(fuel).contains(&option));

        let warning = (!aligned).then(|| {
            let message = format!(
                "Water heating option {option} does not match {} water heating fuel.",
                fuel_label(self.fuel)
            );
            warn!(option = option.key(), fuel = ?self.fuel, "water heating fuel misaligned");
            message
        });

        MeasureVerdict::new("fuel_alignment", WATER_HEATER, "Fuel / Option Alignment")
            .minimum(MeasureValue::from(self.fuel.map(|f| f.as_str())))
            .installed(option.as_str())
            .meets(aligned)
            .warn(warning)
    }
}

fn fuel_label(fuel: Option<WaterHeatingFuel>) -> &'static str {
    fuel.map_or("unset", |f| f.as_str())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn evaluate(
        dwhr: Dwhr,
        option: EfficientWaterHeating,
        fuel: Option<WaterHeatingFuel>,
        measures: WaterMeasures,
    ) -> WaterCompliance {
        WaterSpecification::new(dwhr, option, fuel).evaluate(&measures)
    }

    fn with_uefs(
        gas: Option<f64>,
        electric: Option<f64>,
    ) -> WaterMeasures {
        WaterMeasures {
            dwhr_installed: Some(YesNo::Yes),
            water_heater_brand: Some("Rheem".to_string()),
            water_heater_model: Some("XE50T10".to_string()),
            gas_water_heater_uef: gas,
            electric_water_heater_uef: electric,
        }
    }

    // =========================================================================
    // Gas
    // =========================================================================

    #[test]
    fn gas_5p3_without_data_still_meets() {
        let result = evaluate(
            Dwhr::None,
            EfficientWaterHeating::Option5p3,
            Some(WaterHeatingFuel::Gas),
            WaterMeasures::default(),
        );
        let gas = result.compliance.measure("gas_water_heater_uef").unwrap();

        assert!(result.compliance.meet_requirements);
        assert!(result.meets_water_heater_requirements);
        assert!(!gas.meets_requirement);
        assert_eq!(gas.warning, None);
    }

    #[test]
    fn gas_5p3_low_uef_warns_but_does_not_gate() {
        let result = evaluate(
            Dwhr::Option5p1,
            EfficientWaterHeating::Option5p3,
            Some(WaterHeatingFuel::Gas),
            with_uefs(Some(0.85), None),
        );
        let gas = result.compliance.measure("gas_water_heater_uef").unwrap();

        assert!(result.compliance.meet_requirements);
        assert!(!gas.meets_requirement);
        assert_eq!(
            gas.warning.as_deref(),
            Some("Gas UEF of 0.85 is below the 0.91 minimum.")
        );
    }

    #[test]
    fn gas_5p3_passing() {
        let result = evaluate(
            Dwhr::Option5p1,
            EfficientWaterHeating::Option5p3,
            Some(WaterHeatingFuel::Gas),
            with_uefs(Some(0.96), None),
        );

        assert!(result.compliance.meet_requirements);
        assert_eq!(result.compliance.warnings().count(), 0);
    }

    #[test]
    fn gas_option_with_electric_fuel_is_misaligned() {
        let result = evaluate(
            Dwhr::None,
            EfficientWaterHeating::Option5p3,
            Some(WaterHeatingFuel::Electric),
            with_uefs(Some(0.96), None),
        );
        let gas = result.compliance.measure("gas_water_heater_uef").unwrap();
        let alignment = result.compliance.measure("fuel_alignment").unwrap();

        assert!(gas.meets_requirement);
        assert_eq!(gas.minimum_requirement, MeasureValue::from("N/A"));
        assert!(gas.warning.is_some());
        assert!(!alignment.meets_requirement);
        assert!(alignment.warning.is_some());
        assert!(!result.meets_water_heater_requirements);
        assert!(!result.compliance.meet_requirements);
    }

    // =========================================================================
    // Electric
    // =========================================================================

    #[test]
    fn electric_5p4_low_uef_fails() {
        let result = evaluate(
            Dwhr::None,
            EfficientWaterHeating::Option5p4,
            Some(WaterHeatingFuel::Electric),
            with_uefs(None, Some(1.999)),
        );
        let electric = result.compliance.measure("electric_water_heater_uef").unwrap();

        assert!(!result.compliance.meet_requirements);
        assert!(!result.meets_water_heater_requirements);
        assert_eq!(
            electric.warning.as_deref(),
            Some("Electric UEF of 1.999 is below the 2 minimum.")
        );
    }

    #[test]
    fn electric_options_pass_with_high_uef() {
        for option in [
            EfficientWaterHeating::Option5p4,
            EfficientWaterHeating::Option5p5,
            EfficientWaterHeating::Option5p6,
        ] {
            let result = evaluate(
                Dwhr::Option5p1,
                option,
                Some(WaterHeatingFuel::Electric),
                with_uefs(None, Some(3.5)),
            );

            assert!(result.compliance.meet_requirements, "{option:?}");
            assert_eq!(result.compliance.warnings().count(), 0, "{option:?}");
        }
    }

    #[test]
    fn electric_missing_uef_fails_quietly() {
        let result = evaluate(
            Dwhr::None,
            EfficientWaterHeating::Option5p6,
            Some(WaterHeatingFuel::Electric),
            with_uefs(None, None),
        );
        let electric = result.compliance.measure("electric_water_heater_uef").unwrap();

        assert!(!electric.meets_requirement);
        assert_eq!(electric.warning, None);
        assert!(!result.meets_water_heater_requirements);
    }

    #[test]
    fn electric_option_with_gas_fuel_is_misaligned() {
        let result = evaluate(
            Dwhr::None,
            EfficientWaterHeating::Option5p4,
            Some(WaterHeatingFuel::Gas),
            with_uefs(None, Some(2.5)),
        );
        let gas = result.compliance.measure("gas_water_heater_uef").unwrap();
        let electric = result.compliance.measure("electric_water_heater_uef").unwrap();

        assert!(gas.meets_requirement);
        assert_eq!(gas.warning, None);
        assert!(electric.meets_requirement);
        assert!(electric.warning.is_some());
        assert!(!result.compliance.meet_requirements);
    }

    // =========================================================================
    // DWHR and fuel
    // =========================================================================

    #[test]
    fn dwhr_required_for_5p1() {
        let measures = WaterMeasures {
            dwhr_installed: Some(YesNo::No),
            ..with_uefs(None, Some(3.0))
        };

        let result = evaluate(
            Dwhr::Option5p1,
            EfficientWaterHeating::Option5p6,
            Some(WaterHeatingFuel::Electric),
            measures,
        );
        let dwhr = result.compliance.measure("dwhr_installed").unwrap();

        assert!(!dwhr.meets_requirement);
        assert!(dwhr.warning.is_some());
        assert!(result.meets_water_heater_requirements);
        assert!(!result.compliance.meet_requirements);
    }

    #[test]
    fn unset_fuel_is_never_aligned() {
        let result = evaluate(
            Dwhr::None,
            EfficientWaterHeating::Option5p3,
            None,
            with_uefs(Some(0.95), None),
        );
        let alignment = result.compliance.measure("fuel_alignment").unwrap();

        assert!(!alignment.meets_requirement);
        assert_eq!(
            alignment.warning.as_deref(),
            Some(
                "Water heating option 5.3: GAS - UEF 0.91 (REQUIRED FOR GAS DHW) does not \
                 match unset water heating fuel."
            )
        );
    }

    #[test]
    fn options_selected_lists_both_options() {
        let result = evaluate(
            Dwhr::Option5p1,
            EfficientWaterHeating::Option5p6,
            Some(WaterHeatingFuel::Electric),
            with_uefs(None, Some(3.0)),
        );

        assert_eq!(
            result.compliance.options_selected,
            vec![Dwhr::Option5p1.as_str(), EfficientWaterHeating::Option5p6.as_str()]
        );
    }
}
