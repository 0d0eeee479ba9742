//! Efficient building envelope (worksheet section 1).
//!
//! Ten individual measures are graded against the selected option. Options
//! that define a UA reduction threshold can instead be satisfied by the
//! whole-building UA alternative; when that alternative is met the category
//! passes regardless of the individual measures, and their shortfall
//! warnings are suppressed (framing and raised heel still warn).
//!
//! # Example
//!
//! ```
//! use wcc_core::calculations::EnvelopeSpecification;
//! use wcc_core::models::{BuildingEnvelope, EnvelopeMeasures};
//!
//! let spec = EnvelopeSpecification::new(BuildingEnvelope::Option1p3b);
//! let result = spec.evaluate(&EnvelopeMeasures {
//!     total_ua_alternative: Some(7.5),
//!     ..Default::default()
//! });
//!
//! assert!(result.meet_requirements);
//! ```

use tracing::debug;

use super::{CategoryCompliance, MeasureVerdict};
use crate::catalog::{self, EnvelopeRequirements};
use crate::models::{BuildingEnvelope, EnvelopeMeasures, FramingType, YesNo};

const TITLE: &str = "1. Building Elements";
const WALLS: &str = "Above Grade Walls";
const FENESTRATION: &str = "Vertical Fenestration";
const FLOORS: &str = "Floors";
const CEILING: &str = "Ceiling";
const UA_ALTERNATIVE: &str = "Total UA Alternative (Opt)";

fn shortfall(name: &str) -> String {
    format!(
        "{name} does not meet the minimum requirement. \
         Please review credit selections or submit UA reduction workbook."
    )
}

/// Grades envelope measures for one selected option.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeSpecification {
    option: BuildingEnvelope,
    requirements: &'static EnvelopeRequirements,
}

impl EnvelopeSpecification {
    pub fn new(option: BuildingEnvelope) -> Self {
        Self {
            option,
            requirements: catalog::envelope(option),
        }
    }

    pub fn evaluate(
        &self,
        measures: &EnvelopeMeasures,
    ) -> CategoryCompliance {
        let ua = self.total_ua_alternative(measures.total_ua_alternative);
        let ua_met = ua.meets_requirement;

        let graded = vec![
            self.wall_cavity_r_value(measures.wall_cavity_r_value, ua_met),
            self.wall_continuous_r_value(measures.wall_continuous_r_value, ua_met),
            self.framing_type(measures.framing_type),
            self.window_u_value(measures.window_u_value, ua_met),
            self.window_shgc(measures.window_shgc),
            self.floor_cavity_r_value(measures.floor_cavity_r_value, ua_met),
            self.slab_perimeter_r_value(measures.slab_perimeter_r_value, ua_met),
            self.under_slab_r_value(measures.under_slab_r_value, ua_met),
            self.ceiling_r_value(measures.ceiling_r_value, ua_met),
            self.raised_heel(measures.raised_heel),
        ];

        let meet_requirements = ua_met || graded.iter().all(|m| m.meets_requirement);
        debug!(
            option = self.option.key(),
            ua_met, meet_requirements, "evaluated building envelope"
        );

        let mut measures = graded;
        measures.push(ua);

        CategoryCompliance {
            title: TITLE,
            options_selected: vec![self.option.as_str()],
            measures,
            meet_requirements,
        }
    }

    /// Wall cavity: installed must reach the minimum R-value.
    fn wall_cavity_r_value(
        &self,
        installed: f64,
        ua_met: bool,
    ) -> MeasureVerdict {
        let target = self.requirements.wall_cavity_r_value;
        let meets = installed >= target;
        let warning = (target > 0.0 && installed > 0.0 && !meets && !ua_met)
            .then(|| shortfall("WALL CAVITY INSULATION"));

        MeasureVerdict::new("wall_cavity_r_value", WALLS, "Wall Cavity (R-)")
            .minimum(target)
            .installed(installed)
            .meets(meets)
            .warn(warning)
    }

    /// Wall continuous: only graded when the option requires it.
    fn wall_continuous_r_value(
        &self,
        installed: f64,
        ua_met: bool,
    ) -> MeasureVerdict {
        let target = self.requirements.wall_continuous_r_value;
        let required = target > 0.0;
        let meets = !required || installed >= target;
        let warning = (required && installed > 0.0 && !meets && !ua_met)
            .then(|| shortfall("WALL CONTINUOUS INSULATION"));

        MeasureVerdict::new("wall_continuous_r_value", WALLS, "Wall Continuous (R -)")
            .minimum(target)
            .installed(installed)
            .meets(meets)
            .warn(warning)
    }

    /// Framing: intermediate framing accepts anything. The warning is not
    /// suppressed by the UA alternative.
    fn framing_type(
        &self,
        installed: Option<FramingType>,
    ) -> MeasureVerdict {
        let target = self.requirements.framing_type;
        let meets = target == FramingType::Intermediate || installed == Some(target);

        MeasureVerdict::new("framing_type", WALLS, "Framing Type")
            .minimum(target.as_str())
            .installed(installed.map(|f| f.as_str()))
            .meets(meets)
            .warn((!meets).then(|| shortfall("AGW framing")))
    }

    /// Window U-value: lower is better, and a missing value never passes.
    fn window_u_value(
        &self,
        installed: f64,
        ua_met: bool,
    ) -> MeasureVerdict {
        let target = self.requirements.window_u_value;
        let mut meets = false;
        let mut warning = None;
        if installed > 0.0 && target != 0.0 {
            meets = installed <= target;
            if !meets && !ua_met {
                warning = Some(shortfall("WINDOW U-VALUE"));
            }
        }

        MeasureVerdict::new("window_u_value", FENESTRATION, "Window (U-)")
            .minimum(target)
            .installed(installed)
            .meets(meets)
            .warn(warning)
    }

    /// Window SHGC is informational.
    fn window_shgc(
        &self,
        installed: f64,
    ) -> MeasureVerdict {
        MeasureVerdict::new("window_shgc", FENESTRATION, "Window (SHGC-)")
            .minimum(self.requirements.window_shgc)
            .installed(installed)
    }

    fn floor_cavity_r_value(
        &self,
        installed: f64,
        ua_met: bool,
    ) -> MeasureVerdict {
        let target = self.requirements.floor_cavity_r_value;
        let (meets, warning) = graded_minimum(installed, target, false, ua_met, "FLOOR CAVITY INSULATION");

        MeasureVerdict::new("floor_cavity_r_value", FLOORS, "Floor Cavity (R-) (0.0 if slab)")
            .minimum(target)
            .installed(installed)
            .meets(meets)
            .warn(warning)
    }

    fn slab_perimeter_r_value(
        &self,
        installed: f64,
        ua_met: bool,
    ) -> MeasureVerdict {
        let target = self.requirements.slab_perimeter_r_value;
        let (meets, warning) =
            graded_minimum(installed, target, false, ua_met, "SLAB PERIMETER INSULATION");

        MeasureVerdict::new(
            "slab_perimeter_r_value",
            FLOORS,
            "Slab Perimeter (R-) (0.0 if no slab)",
        )
        .minimum(target)
        .installed(installed)
        .meets(meets)
        .warn(warning)
    }

    fn under_slab_r_value(
        &self,
        installed: f64,
        ua_met: bool,
    ) -> MeasureVerdict {
        let target = self.requirements.under_slab_r_value;
        let (meets, warning) = graded_minimum(installed, target, true, ua_met, "UNDERSLAB INSULATION");

        MeasureVerdict::new("under_slab_r_value", FLOORS, "Under slab (R-) (0.0 if no slab)")
            .minimum(target)
            .installed(installed)
            .meets(meets)
            .warn(warning)
    }

    fn ceiling_r_value(
        &self,
        installed: f64,
        ua_met: bool,
    ) -> MeasureVerdict {
        let target = self.requirements.ceiling_r_value;
        let meets = installed >= target;
        let warning = (installed > 0.0 && !meets && !ua_met).then(|| shortfall("CEILING INSULATION"));

        MeasureVerdict::new("ceiling_r_value", CEILING, "Ceiling (R-)")
            .minimum(target)
            .installed(installed)
            .meets(meets)
            .warn(warning)
    }

    /// Raised heel trusses. An unanswered question passes.
    fn raised_heel(
        &self,
        installed: Option<YesNo>,
    ) -> MeasureVerdict {
        let target = self.requirements.raised_heel;
        let meets = match installed {
            None => true,
            Some(_) if target == YesNo::No => true,
            Some(answer) => answer == YesNo::Yes,
        };

        MeasureVerdict::new("raised_heel", CEILING, "Raised Heel")
            .minimum(target.as_str())
            .installed(installed.map(|a| a.as_str()))
            .meets(meets)
            .warn((!meets).then(|| shortfall("RAISED HEEL TRUSS")))
    }

    /// Whole-building UA reduction in place of the individual measures.
    fn total_ua_alternative(
        &self,
        installed: Option<f64>,
    ) -> MeasureVerdict {
        let target = self.requirements.total_ua_alternative;
        let mut meets = false;
        let mut warning = None;

        match (installed, target) {
            (Some(value), Some(threshold)) if value != 0.0 => {
                meets = value >= threshold;
                warning = Some(if meets {
                    "Please submit a UA Reduction Form".to_string()
                } else {
                    shortfall("UA REDUCTION")
                });
            }
            (Some(_), None) => warning = Some("Not Applicable".to_string()),
            _ => {}
        }

        MeasureVerdict::new("total_ua_alternative", UA_ALTERNATIVE, "UA Reduction")
            .minimum(target)
            .installed(installed)
            .meets(meets)
            .warn(warning)
    }
}

/// Floor style rule: only graded when both the installed value and the
/// minimum are non-zero, otherwise `default` applies.
fn graded_minimum(
    installed: f64,
    target: f64,
    default: bool,
    ua_met: bool,
    name: &str,
) -> (bool, Option<String>) {
    if installed > 0.0 && target != 0.0 {
        let meets = installed >= target;
        let warning = (!meets && !ua_met).then(|| shortfall(name));
        (meets, warning)
    } else {
        (default, None)
    }
}
