//! High efficiency HVAC equipment and distribution (worksheet sections 3
//! and 4).

use tracing::debug;

use super::{CategoryCompliance, MeasureVerdict, presence};
use crate::catalog::{self, HvacDistributionRequirements, HvacRequirements};
use crate::models::{
    DuctLocation, FurnaceLocation, HighEfficiencyHvac, HighEfficiencyHvacDistribution,
    HvacDistributionMeasures, HvacMeasures,
};

const HVAC_TITLE: &str = "3. High Efficiency HVAC Equipment";
const DISTRIBUTION_TITLE: &str = "4. High Efficiency HVAC Distribution";
const FURNACE: &str = "Furnace";
const DISTRIBUTION: &str = "Distribution";

// =============================================================================
// Equipment
// =============================================================================

/// Grades the installed furnace. Only AFUE decides compliance.
#[derive(Debug, Clone, Copy)]
pub struct HvacSpecification {
    option: HighEfficiencyHvac,
    requirements: &'static HvacRequirements,
}

impl HvacSpecification {
    pub fn new(option: HighEfficiencyHvac) -> Self {
        Self {
            option,
            requirements: catalog::hvac(option),
        }
    }

    pub fn evaluate(
        &self,
        measures: &HvacMeasures,
    ) -> CategoryCompliance {
        let afue = self.furnace_afue(measures.furnace_afue);
        let meet_requirements = afue.meets_requirement;
        debug!(option = self.option.key(), meet_requirements, "evaluated HVAC");

        CategoryCompliance {
            title: HVAC_TITLE,
            options_selected: vec![self.option.as_str()],
            measures: vec![
                presence(
                    "furnace_brand",
                    FURNACE,
                    "Furnace Brand",
                    measures.furnace_brand.as_deref(),
                ),
                presence(
                    "furnace_model",
                    FURNACE,
                    "Furnace Model",
                    measures.furnace_model.as_deref(),
                ),
                afue,
            ],
            meet_requirements,
        }
    }

    /// A missing AFUE fails without a warning; a low one warns.
    fn furnace_afue(
        &self,
        installed: Option<f64>,
    ) -> MeasureVerdict {
        let target = self.requirements.furnace_afue;
        let (meets, warning) = match installed {
            None => (false, None),
            Some(afue) if afue >= target => (true, None),
            Some(afue) => (
                false,
                Some(format!("Furnace AFUE of {afue} is below the {target} minimum.")),
            ),
        };

        MeasureVerdict::new("furnace_afue", FURNACE, "Furnace AFUE")
            .minimum(target)
            .installed(installed)
            .meets(meets)
            .warn(warning)
    }
}

// =============================================================================
// Distribution
// =============================================================================

/// Grades furnace and duct placement. Duct leakage is reported only.
#[derive(Debug, Clone, Copy)]
pub struct HvacDistributionSpecification {
    option: HighEfficiencyHvacDistribution,
    requirements: &'static HvacDistributionRequirements,
}

impl HvacDistributionSpecification {
    pub fn new(option: HighEfficiencyHvacDistribution) -> Self {
        Self {
            option,
            requirements: catalog::hvac_distribution(option),
        }
    }

    pub fn evaluate(
        &self,
        measures: &HvacDistributionMeasures,
    ) -> CategoryCompliance {
        let furnace_location = self.furnace_location(measures.furnace_location);
        let duct_location = self.duct_location(measures.duct_location);
        let meet_requirements =
            furnace_location.meets_requirement && duct_location.meets_requirement;
        debug!(
            option = self.option.key(),
            meet_requirements, "evaluated HVAC distribution"
        );

        CategoryCompliance {
            title: DISTRIBUTION_TITLE,
            options_selected: vec![self.option.as_str()],
            measures: vec![
                furnace_location,
                duct_location,
                self.duct_leakage(measures.duct_leakage),
            ],
            meet_requirements,
        }
    }

    /// Any location is fine unless the option requires conditioned space.
    fn furnace_location(
        &self,
        installed: Option<FurnaceLocation>,
    ) -> MeasureVerdict {
        let target = self.requirements.furnace_location;
        let meets = target == FurnaceLocation::UnconditionedSpace
            || installed == Some(FurnaceLocation::ConditionedSpace);
        let warning = match installed {
            Some(found) if !meets => Some(format!(
                "Furnace location {found} does not meet the {target} requirement."
            )),
            _ => None,
        };

        MeasureVerdict::new("furnace_location", FURNACE, "Furnace Location")
            .minimum(target.as_str())
            .installed(installed.map(|l| l.as_str()))
            .meets(meets)
            .warn(warning)
    }

    /// Ducts must be placed at least as well as the option requires.
    fn duct_location(
        &self,
        installed: Option<DuctLocation>,
    ) -> MeasureVerdict {
        let target = self.requirements.duct_location;
        let (meets, warning) = match installed {
            None => (false, None),
            Some(found) if found.rank() >= target.rank() => (true, None),
            Some(found) => (
                false,
                Some(format!(
                    "Duct location {found} does not meet the {target} requirement."
                )),
            ),
        };

        MeasureVerdict::new("duct_location", DISTRIBUTION, "Duct Location")
            .minimum(target.as_str())
            .installed(installed.map(|l| l.as_str()))
            .meets(meets)
            .warn(warning)
    }

    fn duct_leakage(
        &self,
        installed: Option<f64>,
    ) -> MeasureVerdict {
        let verdict = MeasureVerdict::new("duct_leakage", DISTRIBUTION, "Duct Leakage (CFM50)")
            .installed(installed);
        match installed {
            Some(_) => verdict,
            None => verdict
                .meets(false)
                .warn(Some("Duct Leakage is required.".to_string())),
        }
    }
}
