//! Raw inputs for one code credit calculation.
//!
//! Everything here is already normalized into strict types. Turning loose
//! checklist answers into a [`CalculatorInput`] is the job of the boundary
//! layer, not the engine.

use serde::{Deserialize, Serialize};

use super::options::{
    AirLeakageControl, Appliances, BuildingEnvelope, DuctLocation, Dwhr, EfficientWaterHeating,
    FireplaceType, FramingType, FurnaceLocation, HighEfficiencyHvac, HighEfficiencyHvacDistribution,
    RenewableEnergy, ThermostatType, VentilationType, WaterHeatingFuel, YesNo,
};

/// The eight category selections made on the credit worksheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSelections {
    pub envelope_option: BuildingEnvelope,
    pub air_leakage_option: AirLeakageControl,
    pub hvac_option: HighEfficiencyHvac,
    pub hvac_distribution_option: HighEfficiencyHvacDistribution,
    pub dwhr_option: Dwhr,
    pub water_heating_option: EfficientWaterHeating,
    pub renewable_electric_option: RenewableEnergy,
    pub appliance_option: Appliances,
}

/// Facts about the home that are not tied to a single category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeFacts {
    /// Conditioned floor area in square feet.
    pub conditioned_floor_area: f64,

    /// Fuel that heats domestic hot water. Unset is treated as misaligned
    /// with every water heating option.
    pub water_heating_fuel: Option<WaterHeatingFuel>,

    pub thermostat_type: Option<ThermostatType>,

    pub fireplace_efficiency: FireplaceType,
}

/// As-built envelope values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeMeasures {
    pub wall_cavity_r_value: f64,
    pub wall_continuous_r_value: f64,
    pub framing_type: Option<FramingType>,
    pub window_u_value: f64,
    pub window_shgc: f64,
    /// Zero when the home is slab on grade.
    pub floor_cavity_r_value: f64,
    /// Zero when there is no slab.
    pub slab_perimeter_r_value: f64,
    /// Zero when there is no slab.
    pub under_slab_r_value: f64,
    pub ceiling_r_value: f64,
    pub raised_heel: Option<YesNo>,
    /// Whole-building UA reduction percentage from the UA workbook.
    pub total_ua_alternative: Option<f64>,
}

/// As-built air leakage and ventilation values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirLeakageMeasures {
    /// Tested air changes per hour at 50 Pa.
    pub air_leakage_ach: f64,
    pub ventilation_type: Option<VentilationType>,
    pub ventilation_brand: Option<String>,
    pub ventilation_model: Option<String>,
    /// Adjusted sensible recovery efficiency, in percent.
    pub hrv_asre: f64,
}

/// As-built furnace values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HvacMeasures {
    pub furnace_brand: Option<String>,
    pub furnace_model: Option<String>,
    pub furnace_afue: Option<f64>,
}

/// As-built distribution values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HvacDistributionMeasures {
    pub furnace_location: Option<FurnaceLocation>,
    pub duct_location: Option<DuctLocation>,
    /// Duct leakage to outside, CFM50.
    pub duct_leakage: Option<f64>,
}

/// As-built drain water heat recovery and water heater values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterMeasures {
    pub dwhr_installed: Option<YesNo>,
    pub water_heater_brand: Option<String>,
    pub water_heater_model: Option<String>,
    pub gas_water_heater_uef: Option<f64>,
    pub electric_water_heater_uef: Option<f64>,
}

/// Complete, strictly typed input for a calculation.
///
/// Serializes to a flat map whose keys match the checklist question ids
/// without their `wcc-` prefix, so a dumped input can be replayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorInput {
    #[serde(flatten)]
    pub options: OptionSelections,

    #[serde(flatten)]
    pub home: HomeFacts,

    #[serde(flatten)]
    pub envelope: EnvelopeMeasures,

    #[serde(flatten)]
    pub air_leakage: AirLeakageMeasures,

    #[serde(flatten)]
    pub hvac: HvacMeasures,

    #[serde(flatten)]
    pub hvac_distribution: HvacDistributionMeasures,

    #[serde(flatten)]
    pub water: WaterMeasures,
}
