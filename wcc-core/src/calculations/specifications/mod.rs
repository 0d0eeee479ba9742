//! Per-category compliance checks.
//!
//! Each evaluator pairs a selected option with the catalog's minimum
//! requirements and grades the as-built values one measure at a time. The
//! result is a [`CategoryCompliance`]: an ordered list of
//! [`MeasureVerdict`]s plus the category-level `meet_requirements` flag.
//!
//! | Evaluator | Options | Gating measures |
//! |-----------|---------|-----------------|
//! | [`EnvelopeSpecification`] | 1.x | all ten, or the UA alternative |
//! | [`AirLeakageSpecification`] | 2.x | ACH, ventilation type, ASRE |
//! | [`HvacSpecification`] | 3.x | AFUE |
//! | [`HvacDistributionSpecification`] | 4.x | furnace and duct location |
//! | [`WaterSpecification`] | 5.x | DWHR, fuel alignment, electric UEF |

mod air_leakage;
mod envelope;
mod hvac;
mod water;

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::models::CalculatorInput;

pub use air_leakage::AirLeakageSpecification;
pub use envelope::EnvelopeSpecification;
pub use hvac::{HvacDistributionSpecification, HvacSpecification};
pub use water::{WaterCompliance, WaterSpecification};

/// A minimum requirement or installed value as shown on the worksheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MeasureValue {
    Number(f64),
    Text(String),
    Empty,
}

impl From<f64> for MeasureValue {
    fn from(value: f64) -> Self {
        MeasureValue::Number(value)
    }
}

impl From<&str> for MeasureValue {
    fn from(value: &str) -> Self {
        MeasureValue::Text(value.to_string())
    }
}

impl From<String> for MeasureValue {
    fn from(value: String) -> Self {
        MeasureValue::Text(value)
    }
}

impl<T: Into<MeasureValue>> From<Option<T>> for MeasureValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(MeasureValue::Empty, Into::into)
    }
}

impl fmt::Display for MeasureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureValue::Number(n) => write!(f, "{n}"),
            MeasureValue::Text(s) => f.write_str(s),
            MeasureValue::Empty => f.write_str("-"),
        }
    }
}

/// The outcome of grading one as-built value.
///
/// `warning` is `None` whenever the measure passes, except for informative
/// notices such as "Not Applicable".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureVerdict {
    #[serde(skip)]
    pub key: &'static str,
    pub section: &'static str,
    pub label: &'static str,
    pub minimum_requirement: MeasureValue,
    pub installed: MeasureValue,
    pub meets_requirement: bool,
    pub warning: Option<String>,
}

impl MeasureVerdict {
    pub(crate) fn new(
        key: &'static str,
        section: &'static str,
        label: &'static str,
    ) -> Self {
        Self {
            key,
            section,
            label,
            minimum_requirement: MeasureValue::Empty,
            installed: MeasureValue::Empty,
            meets_requirement: true,
            warning: None,
        }
    }

    pub(crate) fn minimum(
        mut self,
        value: impl Into<MeasureValue>,
    ) -> Self {
        self.minimum_requirement = value.into();
        self
    }

    pub(crate) fn installed(
        mut self,
        value: impl Into<MeasureValue>,
    ) -> Self {
        self.installed = value.into();
        self
    }

    pub(crate) fn meets(
        mut self,
        meets_requirement: bool,
    ) -> Self {
        self.meets_requirement = meets_requirement;
        self
    }

    pub(crate) fn warn(
        mut self,
        warning: Option<String>,
    ) -> Self {
        self.warning = warning;
        self
    }
}

/// Graded measures for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCompliance {
    /// Numbered heading used by reports, e.g. `1. Building Elements`.
    #[serde(skip)]
    pub title: &'static str,

    /// Labels of the option(s) this category was graded against.
    pub options_selected: Vec<&'static str>,

    #[serde(serialize_with = "serialize_measures")]
    pub measures: Vec<MeasureVerdict>,

    pub meet_requirements: bool,
}

impl CategoryCompliance {
    /// Looks up a verdict by its measure key.
    pub fn measure(
        &self,
        key: &str,
    ) -> Option<&MeasureVerdict> {
        self.measures.iter().find(|m| m.key == key)
    }

    /// All warnings attached to this category, in measure order.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.measures.iter().filter_map(|m| m.warning.as_deref())
    }
}

fn serialize_measures<S: Serializer>(
    measures: &[MeasureVerdict],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(measures.iter().map(|m| (m.key, m)))
}

/// Shared pass/fail logic for free-text presence checks such as brand and
/// model. These never gate compliance.
pub(crate) fn presence(
    key: &'static str,
    section: &'static str,
    label: &'static str,
    installed: Option<&str>,
) -> MeasureVerdict {
    let installed = installed.map(str::trim).filter(|s| !s.is_empty());
    let verdict = MeasureVerdict::new(key, section, label).installed(installed);
    match installed {
        Some(_) => verdict,
        None => verdict
            .meets(false)
            .warn(Some(format!("{label} is required."))),
    }
}

/// The five graded categories for one home.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Specifications {
    pub building_envelope: CategoryCompliance,
    pub air_leakage: CategoryCompliance,
    pub hvac: CategoryCompliance,
    pub hvac_distribution: CategoryCompliance,
    pub water: WaterCompliance,
}

impl Specifications {
    /// Grades all five categories against the selected options.
    pub fn evaluate(input: &CalculatorInput) -> Self {
        let options = &input.options;
        let specifications = Self {
            building_envelope: EnvelopeSpecification::new(options.envelope_option)
                .evaluate(&input.envelope),
            air_leakage: AirLeakageSpecification::new(options.air_leakage_option)
                .evaluate(&input.air_leakage),
            hvac: HvacSpecification::new(options.hvac_option).evaluate(&input.hvac),
            hvac_distribution: HvacDistributionSpecification::new(
                options.hvac_distribution_option,
            )
            .evaluate(&input.hvac_distribution),
            water: WaterSpecification::new(
                options.dwhr_option,
                options.water_heating_option,
                input.home.water_heating_fuel,
            )
            .evaluate(&input.water),
        };
        debug!(
            passing = specifications
                .categories()
                .iter()
                .filter(|c| c.meet_requirements)
                .count(),
            "evaluated specifications"
        );
        specifications
    }

    /// Categories in worksheet order.
    pub fn categories(&self) -> [&CategoryCompliance; 5] {
        [
            &self.building_envelope,
            &self.air_leakage,
            &self.hvac,
            &self.hvac_distribution,
            &self.water.compliance,
        ]
    }
}
