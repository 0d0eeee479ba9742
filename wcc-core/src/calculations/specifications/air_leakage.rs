//! Air leakage control and efficient ventilation (worksheet section 2).

use tracing::debug;

use super::{CategoryCompliance, MeasureVerdict, presence};
use crate::catalog::{self, AirLeakageRequirements};
use crate::models::{AirLeakageControl, AirLeakageMeasures, VentilationType};

const TITLE: &str = "2. Air Leakage Control & Efficient Ventilation";
const AIR_LEAKAGE: &str = "Air Leakage";
const VENTILATION: &str = "Ventilation";

/// Grades the blower door result and the installed ventilation system.
#[derive(Debug, Clone, Copy)]
pub struct AirLeakageSpecification {
    option: AirLeakageControl,
    requirements: &'static AirLeakageRequirements,
}

impl AirLeakageSpecification {
    pub fn new(option: AirLeakageControl) -> Self {
        Self {
            option,
            requirements: catalog::air_leakage(option),
        }
    }

    /// Brand and model are reported but only ACH, ventilation type and ASRE
    /// decide compliance.
    pub fn evaluate(
        &self,
        measures: &AirLeakageMeasures,
    ) -> CategoryCompliance {
        let ach = self.air_leakage_ach(measures.air_leakage_ach);
        let ventilation_type = self.ventilation_type(measures.ventilation_type);
        let asre = self.hrv_asre(measures.hrv_asre);

        let meet_requirements =
            ach.meets_requirement && ventilation_type.meets_requirement && asre.meets_requirement;
        debug!(
            option = self.option.key(),
            meet_requirements, "evaluated air leakage"
        );

        CategoryCompliance {
            title: TITLE,
            options_selected: vec![self.option.as_str()],
            measures: vec![
                ach,
                ventilation_type,
                presence(
                    "ventilation_brand",
                    VENTILATION,
                    "Ventilation Brand",
                    measures.ventilation_brand.as_deref(),
                ),
                presence(
                    "ventilation_model",
                    VENTILATION,
                    "Ventilation Model",
                    measures.ventilation_model.as_deref(),
                ),
                asre,
            ],
            meet_requirements,
        }
    }

    /// ACH50 is a maximum. A zero reading means no test was entered.
    fn air_leakage_ach(
        &self,
        installed: f64,
    ) -> MeasureVerdict {
        let target = self.requirements.air_leakage_ach;
        let tested = installed > 0.0;
        let meets = tested && installed <= target;
        let warning = (tested && !meets).then(|| {
            format!("Air leakage of {installed} ACH50 exceeds the {target} ACH50 maximum.")
        });

        MeasureVerdict::new("air_leakage_ach", AIR_LEAKAGE, "Air Leakage (ACH50)")
            .minimum(target)
            .installed(installed)
            .meets(meets)
            .warn(warning)
    }

    /// Balanced heat recovery satisfies every option.
    fn ventilation_type(
        &self,
        installed: Option<VentilationType>,
    ) -> MeasureVerdict {
        let target = self.requirements.ventilation_type;
        let meets = installed == Some(VentilationType::HrvErv)
            || target.is_none()
            || installed == target;
        let warning = (!meets).then(|| match (installed, target) {
            (Some(found), Some(required)) => {
                format!("Ventilation type {found} does not meet the {required} requirement.")
            }
            (None, Some(required)) => format!("Ventilation type {required} is required."),
            _ => "Ventilation type does not meet the requirement.".to_string(),
        });

        MeasureVerdict::new("ventilation_type", VENTILATION, "Ventilation Type")
            .minimum(target.map(|t| t.as_str()))
            .installed(installed.map(|t| t.as_str()))
            .meets(meets)
            .warn(warning)
    }

    fn hrv_asre(
        &self,
        installed: f64,
    ) -> MeasureVerdict {
        let target = self.requirements.hrv_asre;
        let (meets, warning) = match target {
            None => (true, None),
            Some(minimum) if installed >= minimum => (true, None),
            Some(minimum) => (
                false,
                Some(format!("HRV ASRE of {installed}% is below the {minimum}% minimum.")),
            ),
        };

        MeasureVerdict::new("hrv_asre", VENTILATION, "HRV ASRE (%)")
            .minimum(target)
            .installed(installed)
            .meets(meets)
            .warn(warning)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn passing() -> AirLeakageMeasures {
        AirLeakageMeasures {
            air_leakage_ach: 0.5,
            ventilation_type: Some(VentilationType::HrvErv),
            ventilation_brand: Some("Zehnder".to_string()),
            ventilation_model: Some("ComfoAir 350".to_string()),
            hrv_asre: 85.0,
        }
    }

    // =========================================================================
    // Category tests
    // =========================================================================

    #[test]
    fn passing_data_meets_every_option() {
        for option in AirLeakageControl::ALL {
            let result = AirLeakageSpecification::new(*option).evaluate(&passing());

            assert!(result.meet_requirements, "{option:?}");
            assert_eq!(result.warnings().count(), 0, "{option:?}");
        }
    }

    #[test]
    fn no_data_fails() {
        let result =
            AirLeakageSpecification::new(AirLeakageControl::Option2p4).evaluate(&Default::default());

        assert!(!result.meet_requirements);
        assert!(!result.measure("air_leakage_ach").unwrap().meets_requirement);
        assert_eq!(result.measure("air_leakage_ach").unwrap().warning, None);
        assert!(result.measure("ventilation_type").unwrap().warning.is_some());
        assert!(result.measure("hrv_asre").unwrap().warning.is_some());
    }

    #[test]
    fn missing_brand_does_not_gate_compliance() {
        let measures = AirLeakageMeasures {
            ventilation_brand: None,
            ventilation_model: None,
            ..passing()
        };

        let result = AirLeakageSpecification::new(AirLeakageControl::Option2p2).evaluate(&measures);

        assert!(result.meet_requirements);
        assert!(!result.measure("ventilation_brand").unwrap().meets_requirement);
        assert!(!result.measure("ventilation_model").unwrap().meets_requirement);
    }

    // =========================================================================
    // Individual measure tests
    // =========================================================================

    #[test]
    fn ach_is_a_maximum() {
        let spec = AirLeakageSpecification::new(AirLeakageControl::Option2p3);

        assert!(spec.air_leakage_ach(1.5).meets_requirement);
        assert!(spec.air_leakage_ach(1.0).meets_requirement);

        let leaky = spec.air_leakage_ach(1.6);
        assert!(!leaky.meets_requirement);
        assert_eq!(
            leaky.warning.as_deref(),
            Some("Air leakage of 1.6 ACH50 exceeds the 1.5 ACH50 maximum.")
        );
    }

    #[test]
    fn exhaust_only_passes_when_no_type_is_required() {
        let spec = AirLeakageSpecification::new(AirLeakageControl::Option2p1);

        assert!(spec.ventilation_type(Some(VentilationType::ExhaustOnly)).meets_requirement);
        assert!(spec.ventilation_type(None).meets_requirement);
    }

    #[test]
    fn heat_recovery_required_for_2p2_and_up() {
        let spec = AirLeakageSpecification::new(AirLeakageControl::Option2p2);

        let balanced = spec.ventilation_type(Some(VentilationType::Balanced));
        assert!(!balanced.meets_requirement);
        assert_eq!(
            balanced.warning.as_deref(),
            Some("Ventilation type Balanced (no recovery) does not meet the HRV/ERV requirement.")
        );
        assert!(spec.ventilation_type(Some(VentilationType::HrvErv)).meets_requirement);
    }

    #[test]
    fn asre_ignored_without_minimum() {
        let spec = AirLeakageSpecification::new(AirLeakageControl::None);

        assert!(spec.hrv_asre(0.0).meets_requirement);
    }

    #[test]
    fn asre_minimum_enforced() {
        let spec = AirLeakageSpecification::new(AirLeakageControl::Option2p4);

        assert!(spec.hrv_asre(80.0).meets_requirement);
        assert!(!spec.hrv_asre(79.0).meets_requirement);
    }
}
