//! Normalization of raw checklist answers into a [`CalculatorInput`].
//!
//! Checklist answers arrive as a flat map of question id to text. Question
//! ids may carry a `wcc-` or `wcc_` prefix. Every field is checked and all
//! problems are returned together so a verifier can fix a checklist in one
//! pass.
//!
//! | Kind      | Fields |
//! |-----------|--------|
//! | choice    | the eight options, fuel, thermostat, fireplace, framing, raised heel, ventilation, locations, DWHR |
//! | integer   | floor area, R-values, AFUE, duct leakage |
//! | float     | window U/SHGC, UA alternative, ACH, ASRE, UEFs |
//! | text      | brand and model names (32 characters max) |

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;
use wcc_core::{
    AirLeakageMeasures, CalculatorInput, EnvelopeMeasures, HomeFacts, HvacDistributionMeasures,
    HvacMeasures, OptionSelections, ThermostatType, WaterHeatingFuel, WaterMeasures,
};

const MAX_TEXT_LENGTH: usize = 32;

static KEY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^wcc[-_]").expect("valid regex"));

/// A single problem with one checklist answer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("'{value}' is not a valid choice for {field}")]
    UnknownChoice { field: &'static str, value: String },

    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be a whole number, got '{value}'")]
    NotAnInteger { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Water Heating Fuel of {fuel} requires {required}")]
    FuelRequiresUef {
        fuel: WaterHeatingFuel,
        required: &'static str,
    },
}

impl FieldError {
    /// The checklist question the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::UnknownChoice { field, .. }
            | Self::NotANumber { field, .. }
            | Self::NotAnInteger { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::TooLong { field, .. } => *field,
            Self::FuelRequiresUef { fuel, .. } => match fuel {
                WaterHeatingFuel::Gas => "gas_water_heater_uef",
                WaterHeatingFuel::Electric => "electric_water_heater_uef",
            },
        }
    }
}

/// Every problem found in one checklist.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", join_errors(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Strips an optional `wcc-`/`wcc_` prefix from a question id.
///
/// ```
/// use wcc_data::checklist::normalize_key;
///
/// assert_eq!(normalize_key("wcc-envelope_option"), "envelope_option");
/// assert_eq!(normalize_key("wcc_duct_leakage"), "duct_leakage");
/// assert_eq!(normalize_key("hvac_option"), "hvac_option");
/// ```
pub fn normalize_key(key: &str) -> &str {
    let key = key.trim();
    match KEY_PREFIX.find(key) {
        Some(prefix) => &key[prefix.end()..],
        None => key,
    }
}

/// Builds a calculator input from raw checklist answers.
///
/// Blank answers are treated as absent.
pub fn build_input(answers: &BTreeMap<String, String>) -> Result<CalculatorInput, ValidationErrors> {
    let mut checklist = Checklist::new(answers);

    let options = OptionSelections {
        envelope_option: checklist.choice("envelope_option").unwrap_or_default(),
        air_leakage_option: checklist.choice("air_leakage_option").unwrap_or_default(),
        hvac_option: checklist.choice("hvac_option").unwrap_or_default(),
        hvac_distribution_option: checklist
            .choice("hvac_distribution_option")
            .unwrap_or_default(),
        dwhr_option: checklist.choice("dwhr_option").unwrap_or_default(),
        water_heating_option: checklist.choice("water_heating_option").unwrap_or_default(),
        renewable_electric_option: checklist
            .choice("renewable_electric_option")
            .unwrap_or_default(),
        appliance_option: checklist.choice("appliance_option").unwrap_or_default(),
    };

    let home = HomeFacts {
        conditioned_floor_area: checklist
            .integer("conditioned_floor_area", 500..=6000)
            .unwrap_or_default(),
        water_heating_fuel: checklist.fuel(),
        thermostat_type: checklist.thermostat(),
        fireplace_efficiency: checklist.choice("fireplace_efficiency").unwrap_or_default(),
    };

    let envelope = EnvelopeMeasures {
        wall_cavity_r_value: checklist.integer("wall_cavity_r_value", 0..=50).unwrap_or_default(),
        wall_continuous_r_value: checklist
            .integer("wall_continuous_r_value", 0..=50)
            .unwrap_or_default(),
        framing_type: checklist.choice("framing_type"),
        window_u_value: checklist.float("window_u_value", 0.0..=1.0).unwrap_or_default(),
        window_shgc: checklist.optional_float("window_shgc", 0.0..=1.0).unwrap_or_default(),
        floor_cavity_r_value: checklist
            .optional_integer("floor_cavity_r_value", 0..=60)
            .unwrap_or_default(),
        slab_perimeter_r_value: checklist
            .optional_integer("slab_perimeter_r_value", 0..=50)
            .unwrap_or_default(),
        under_slab_r_value: checklist
            .optional_integer("under_slab_r_value", 0..=50)
            .unwrap_or_default(),
        ceiling_r_value: checklist.integer("ceiling_r_value", 0..=80).unwrap_or_default(),
        raised_heel: checklist.choice("raised_heel"),
        total_ua_alternative: checklist.optional_float("total_ua_alternative", 0.0..=100.0),
    };

    let air_leakage = AirLeakageMeasures {
        air_leakage_ach: checklist.float("air_leakage_ach", 0.0..=10.0).unwrap_or_default(),
        ventilation_type: checklist.choice("ventilation_type"),
        ventilation_brand: checklist.text("ventilation_brand"),
        ventilation_model: checklist.text("ventilation_model"),
        hrv_asre: checklist.optional_float("hrv_asre", 0.0..=100.0).unwrap_or_default(),
    };

    let hvac = HvacMeasures {
        furnace_brand: checklist.text("furnace_brand"),
        furnace_model: checklist.text("furnace_model"),
        furnace_afue: checklist.integer("furnace_afue", 10..=100),
    };

    let hvac_distribution = HvacDistributionMeasures {
        furnace_location: checklist.choice("furnace_location"),
        duct_location: checklist.choice("duct_location"),
        duct_leakage: checklist.integer("duct_leakage", 0..=100),
    };

    let water = WaterMeasures {
        dwhr_installed: checklist.choice("dwhr_installed"),
        water_heater_brand: checklist.text("water_heater_brand"),
        water_heater_model: checklist.text("water_heater_model"),
        gas_water_heater_uef: checklist.optional_float("gas_water_heater_uef", 0.0..=1.0),
        electric_water_heater_uef: checklist
            .optional_float("electric_water_heater_uef", 0.0..=5.0),
    };

    match home.water_heating_fuel {
        Some(fuel @ WaterHeatingFuel::Electric) if water.electric_water_heater_uef.is_none() => {
            checklist.push(FieldError::FuelRequiresUef {
                fuel,
                required: "Electric Heater UEF",
            });
        }
        Some(fuel @ WaterHeatingFuel::Gas) if water.gas_water_heater_uef.is_none() => {
            checklist.push(FieldError::FuelRequiresUef {
                fuel,
                required: "Gas Heater UEF",
            });
        }
        _ => {}
    }

    checklist.finish(CalculatorInput {
        options,
        home,
        envelope,
        air_leakage,
        hvac,
        hvac_distribution,
        water,
    })
}

// ---------------------------------------------------------------------------
// Field readers
// ---------------------------------------------------------------------------

/// Answers keyed by normalized question id, plus the errors found so far.
struct Checklist<'a> {
    answers: BTreeMap<&'a str, &'a str>,
    errors: Vec<FieldError>,
}

impl<'a> Checklist<'a> {
    fn new(raw: &'a BTreeMap<String, String>) -> Self {
        let answers = raw
            .iter()
            .map(|(key, value)| (normalize_key(key), value.trim()))
            .filter(|(_, value)| !value.is_empty())
            .collect();

        Self {
            answers,
            errors: Vec::new(),
        }
    }

    fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    fn get(&self, field: &str) -> Option<&'a str> {
        self.answers.get(field).copied()
    }

    fn require(&mut self, field: &'static str) -> Option<&'a str> {
        let value = self.get(field);
        if value.is_none() {
            self.push(FieldError::Missing { field });
        }
        value
    }

    /// Required enum answer, matched by label or key.
    fn choice<T: std::str::FromStr>(&mut self, field: &'static str) -> Option<T> {
        let raw = self.require(field)?;
        self.parse_choice(field, raw, T::from_str(raw).ok())
    }

    fn fuel(&mut self) -> Option<WaterHeatingFuel> {
        let raw = self.require("water_heating_fuel")?;
        self.parse_choice("water_heating_fuel", raw, WaterHeatingFuel::parse_ignore_case(raw))
    }

    fn thermostat(&mut self) -> Option<ThermostatType> {
        let raw = self.require("thermostat_type")?;
        self.parse_choice("thermostat_type", raw, ThermostatType::parse_ignore_case(raw))
    }

    fn parse_choice<T>(&mut self, field: &'static str, raw: &str, parsed: Option<T>) -> Option<T> {
        if parsed.is_none() {
            self.push(FieldError::UnknownChoice {
                field,
                value: raw.to_string(),
            });
        }
        parsed
    }

    fn integer(&mut self, field: &'static str, range: RangeInclusive<i64>) -> Option<f64> {
        let raw = self.require(field)?;
        self.parse_integer(field, raw, range)
    }

    fn optional_integer(&mut self, field: &'static str, range: RangeInclusive<i64>) -> Option<f64> {
        let raw = self.get(field)?;
        self.parse_integer(field, raw, range)
    }

    fn parse_integer(
        &mut self,
        field: &'static str,
        raw: &str,
        range: RangeInclusive<i64>,
    ) -> Option<f64> {
        match raw.parse::<i64>() {
            Ok(value) => {
                let range = (*range.start() as f64)..=(*range.end() as f64);
                self.check_range(field, value as f64, range)
            }
            Err(_) if raw.parse::<f64>().is_ok() => {
                self.push(FieldError::NotAnInteger {
                    field,
                    value: raw.to_string(),
                });
                None
            }
            Err(_) => {
                self.push(FieldError::NotANumber {
                    field,
                    value: raw.to_string(),
                });
                None
            }
        }
    }

    fn float(&mut self, field: &'static str, range: RangeInclusive<f64>) -> Option<f64> {
        let raw = self.require(field)?;
        self.parse_float(field, raw, range)
    }

    fn optional_float(&mut self, field: &'static str, range: RangeInclusive<f64>) -> Option<f64> {
        let raw = self.get(field)?;
        self.parse_float(field, raw, range)
    }

    fn parse_float(
        &mut self,
        field: &'static str,
        raw: &str,
        range: RangeInclusive<f64>,
    ) -> Option<f64> {
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => self.check_range(field, value, range),
            _ => {
                self.push(FieldError::NotANumber {
                    field,
                    value: raw.to_string(),
                });
                None
            }
        }
    }

    fn check_range(
        &mut self,
        field: &'static str,
        value: f64,
        range: RangeInclusive<f64>,
    ) -> Option<f64> {
        if range.contains(&value) {
            return Some(value);
        }
        self.push(FieldError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        });
        None
    }

    /// Optional free text such as a brand or model name.
    fn text(&mut self, field: &'static str) -> Option<String> {
        let raw = self.get(field)?;
        if raw.chars().count() > MAX_TEXT_LENGTH {
            self.push(FieldError::TooLong {
                field,
                max: MAX_TEXT_LENGTH,
            });
            return None;
        }
        Some(raw.to_string())
    }

    fn finish(self, input: CalculatorInput) -> Result<CalculatorInput, ValidationErrors> {
        if self.errors.is_empty() {
            debug!(fields = self.answers.len(), "checklist validated");
            Ok(input)
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wcc_core::{
        BuildingEnvelope, DuctLocation, FireplaceType, HighEfficiencyHvac, RenewableEnergy,
        VentilationType, YesNo,
    };

    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn complete_checklist() -> BTreeMap<String, String> {
        answers(&[
            ("wcc-envelope_option", "OPTION_1p6a"),
            ("wcc-air_leakage_option", "OPTION_2p4"),
            ("wcc-hvac_option", "OPTION_3p1"),
            ("wcc-hvac_distribution_option", "OPTION_4p2"),
            ("wcc-dwhr_option", "OPTION_5p1"),
            ("wcc-water_heating_option", "OPTION_5p6"),
            ("wcc-renewable_electric_option", "OPTION_6p1c"),
            ("wcc-appliance_option", "OPTION_7p1"),
            ("wcc-conditioned_floor_area", "2500"),
            ("wcc-water_heating_fuel", "Electric"),
            ("wcc-thermostat_type", "ecobee4"),
            ("wcc-fireplace_efficiency", "70-75 FE"),
            ("wcc-wall_cavity_r_value", "21"),
            ("wcc-wall_continuous_r_value", "16"),
            ("wcc-framing_type", "Intermediate"),
            ("wcc-window_u_value", "0.18"),
            ("wcc-window_shgc", ""),
            ("wcc-floor_cavity_r_value", "48"),
            ("wcc-ceiling_r_value", "60"),
            ("wcc-raised_heel", "Yes"),
            ("wcc-air_leakage_ach", "0.6"),
            ("wcc-ventilation_type", "HRV/ERV"),
            ("wcc-hrv_asre", "80"),
            ("wcc-furnace_brand", "Carrier"),
            ("wcc-furnace_model", "59MN7"),
            ("wcc-furnace_afue", "97"),
            ("wcc-furnace_location", "Conditioned Space"),
            ("wcc-duct_location", "Conditioned Space"),
            ("wcc-duct_leakage", "0"),
            ("wcc-dwhr_installed", "Yes"),
            ("wcc-water_heater_brand", "Sanden"),
            ("wcc-electric_water_heater_uef", "3.2"),
        ])
    }

    // =========================================================================
    // Keys
    // =========================================================================

    #[test]
    fn prefixes_are_stripped() {
        assert_eq!(normalize_key("wcc-hvac_option"), "hvac_option");
        assert_eq!(normalize_key("wcc_hvac_option"), "hvac_option");
        assert_eq!(normalize_key(" hvac_option "), "hvac_option");
        assert_eq!(normalize_key("xwcc-hvac_option"), "xwcc-hvac_option");
    }

    // =========================================================================
    // Successful normalization
    // =========================================================================

    #[test]
    fn complete_checklist_builds_input() {
        let input = build_input(&complete_checklist()).unwrap();

        assert_eq!(input.options.envelope_option, BuildingEnvelope::Option1p6a);
        assert_eq!(input.options.hvac_option, HighEfficiencyHvac::Option3p1);
        assert_eq!(
            input.options.renewable_electric_option,
            RenewableEnergy::Option6p1c
        );
        assert_eq!(input.home.conditioned_floor_area, 2500.0);
        assert_eq!(input.home.water_heating_fuel, Some(WaterHeatingFuel::Electric));
        assert_eq!(input.home.thermostat_type, Some(ThermostatType::Ecobee4));
        assert_eq!(input.home.fireplace_efficiency, FireplaceType::From70To75);
        assert_eq!(input.envelope.window_shgc, 0.0);
        assert_eq!(input.envelope.slab_perimeter_r_value, 0.0);
        assert_eq!(input.envelope.total_ua_alternative, None);
        assert_eq!(input.air_leakage.ventilation_type, Some(VentilationType::HrvErv));
        assert_eq!(input.air_leakage.ventilation_brand, None);
        assert_eq!(input.hvac.furnace_afue, Some(97.0));
        assert_eq!(input.hvac.furnace_brand.as_deref(), Some("Carrier"));
        assert_eq!(
            input.hvac_distribution.duct_location,
            Some(DuctLocation::ConditionedSpace)
        );
        assert_eq!(input.water.dwhr_installed, Some(YesNo::Yes));
        assert_eq!(input.water.electric_water_heater_uef, Some(3.2));
    }

    #[test]
    fn labels_and_unprefixed_keys_are_accepted() {
        let mut checklist = complete_checklist();
        checklist.remove("wcc-envelope_option");
        checklist.insert(
            "envelope_option".to_string(),
            "1.6.a: U0.18 windows, ceiling/vaults R60, R21+R16ci walls, R48 floor or R20 slabs"
                .to_string(),
        );

        let input = build_input(&checklist).unwrap();

        assert_eq!(input.options.envelope_option, BuildingEnvelope::Option1p6a);
    }

    #[test]
    fn thermostat_and_fuel_ignore_case() {
        let mut checklist = complete_checklist();
        checklist.insert("wcc-thermostat_type".to_string(), "NEST THERMOSTAT".to_string());
        checklist.insert("wcc-water_heating_fuel".to_string(), "electric".to_string());

        let input = build_input(&checklist).unwrap();

        assert_eq!(input.home.thermostat_type, Some(ThermostatType::Nest));
        assert_eq!(input.home.water_heating_fuel, Some(WaterHeatingFuel::Electric));
    }

    // =========================================================================
    // Rejections
    // =========================================================================

    #[test]
    fn missing_fields_are_all_reported() {
        let mut checklist = complete_checklist();
        checklist.remove("wcc-hvac_option");
        checklist.insert("wcc-duct_leakage".to_string(), "   ".to_string());

        let errors = build_input(&checklist).unwrap_err();

        assert_eq!(
            errors.errors(),
            &[
                FieldError::Missing {
                    field: "hvac_option"
                },
                FieldError::Missing {
                    field: "duct_leakage"
                },
            ]
        );
    }

    #[test]
    fn unknown_choice_is_rejected() {
        let mut checklist = complete_checklist();
        checklist.insert("wcc-duct_location".to_string(), "Attic".to_string());

        let errors = build_input(&checklist).unwrap_err();

        assert_eq!(
            errors.errors(),
            &[FieldError::UnknownChoice {
                field: "duct_location",
                value: "Attic".to_string(),
            }]
        );
        assert_eq!(
            errors.to_string(),
            "'Attic' is not a valid choice for duct_location"
        );
    }

    #[test]
    fn numeric_fields_are_checked() {
        let mut checklist = complete_checklist();
        checklist.insert("wcc-conditioned_floor_area".to_string(), "499".to_string());
        checklist.insert("wcc-furnace_afue".to_string(), "96.5".to_string());
        checklist.insert("wcc-air_leakage_ach".to_string(), "low".to_string());

        let errors = build_input(&checklist).unwrap_err();

        assert_eq!(
            errors.errors(),
            &[
                FieldError::OutOfRange {
                    field: "conditioned_floor_area",
                    value: 499.0,
                    min: 500.0,
                    max: 6000.0,
                },
                FieldError::NotANumber {
                    field: "air_leakage_ach",
                    value: "low".to_string(),
                },
                FieldError::NotAnInteger {
                    field: "furnace_afue",
                    value: "96.5".to_string(),
                },
            ]
        );
    }

    #[test]
    fn long_model_names_are_rejected() {
        let mut checklist = complete_checklist();
        checklist.insert("wcc-furnace_model".to_string(), "M".repeat(33));

        let errors = build_input(&checklist).unwrap_err();

        assert_eq!(
            errors.errors(),
            &[FieldError::TooLong {
                field: "furnace_model",
                max: 32,
            }]
        );
    }

    #[test]
    fn electric_fuel_requires_electric_uef() {
        let mut checklist = complete_checklist();
        checklist.remove("wcc-electric_water_heater_uef");

        let errors = build_input(&checklist).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.to_string(),
            "Water Heating Fuel of Electric requires Electric Heater UEF"
        );
        assert_eq!(errors.errors()[0].field(), "electric_water_heater_uef");
    }

    #[test]
    fn gas_fuel_requires_gas_uef() {
        let mut checklist = complete_checklist();
        checklist.insert("wcc-water_heating_fuel".to_string(), "gas".to_string());

        let errors = build_input(&checklist).unwrap_err();

        assert_eq!(
            errors.errors(),
            &[FieldError::FuelRequiresUef {
                fuel: WaterHeatingFuel::Gas,
                required: "Gas Heater UEF",
            }]
        );
    }
}
