//! Minimum requirements and credit values for every worksheet option.
//!
//! The tables are plain `static` data indexed by the option enums, so every
//! lookup is total and the catalog can never change at runtime. An
//! `eligible_credits` of `None` marks a selection that cannot be credited.

use crate::models::{
    AirLeakageControl, Appliances, BuildingEnvelope, DuctLocation, Dwhr, EfficientWaterHeating,
    FramingType, FurnaceLocation, HighEfficiencyHvac, HighEfficiencyHvacDistribution,
    RenewableEnergy, VentilationType, WaterHeatingFuel, YesNo,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeRequirements {
    pub wall_cavity_r_value: f64,
    pub wall_continuous_r_value: f64,
    pub framing_type: FramingType,
    pub window_u_value: f64,
    pub window_shgc: Option<f64>,
    pub floor_cavity_r_value: f64,
    pub slab_perimeter_r_value: f64,
    pub under_slab_r_value: f64,
    pub ceiling_r_value: f64,
    pub raised_heel: YesNo,
    /// UA reduction percentage that satisfies the whole category.
    pub total_ua_alternative: Option<f64>,
    pub eligible_credits: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirLeakageRequirements {
    /// Maximum tested ACH50.
    pub air_leakage_ach: f64,
    pub ventilation_type: Option<VentilationType>,
    pub hrv_asre: Option<f64>,
    pub eligible_credits: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HvacRequirements {
    pub furnace_afue: f64,
    pub eligible_credits: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HvacDistributionRequirements {
    pub furnace_location: FurnaceLocation,
    pub duct_location: DuctLocation,
    pub eligible_credits: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DwhrRequirements {
    /// `None` when drain water heat recovery is not required.
    pub dwhr_installed: Option<YesNo>,
    pub eligible_credits: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterHeatingRequirements {
    pub gas_water_heater_uef: Option<f64>,
    pub electric_water_heater_uef: Option<f64>,
    pub eligible_credits: Option<f64>,
}

// =============================================================================
// Building envelope
// =============================================================================

const ENVELOPE_BASELINE: EnvelopeRequirements = EnvelopeRequirements {
    wall_cavity_r_value: 21.0,
    wall_continuous_r_value: 0.0,
    framing_type: FramingType::Intermediate,
    window_u_value: 0.30,
    window_shgc: None,
    floor_cavity_r_value: 30.0,
    slab_perimeter_r_value: 10.0,
    under_slab_r_value: 0.0,
    ceiling_r_value: 49.0,
    raised_heel: YesNo::No,
    total_ua_alternative: None,
    eligible_credits: Some(0.0),
};

static ENVELOPE: [EnvelopeRequirements; 12] = [
    // NONE
    ENVELOPE_BASELINE,
    // 1.1
    EnvelopeRequirements {
        window_u_value: 0.24,
        eligible_credits: Some(0.5),
        ..ENVELOPE_BASELINE
    },
    // 1.2
    EnvelopeRequirements {
        window_u_value: 0.20,
        eligible_credits: Some(1.0),
        ..ENVELOPE_BASELINE
    },
    // 1.3.a
    EnvelopeRequirements {
        window_u_value: 0.28,
        floor_cavity_r_value: 38.0,
        under_slab_r_value: 10.0,
        total_ua_alternative: Some(5.0),
        eligible_credits: Some(0.5),
        ..ENVELOPE_BASELINE
    },
    // 1.3.b
    EnvelopeRequirements {
        total_ua_alternative: Some(5.0),
        eligible_credits: Some(0.5),
        ..ENVELOPE_BASELINE
    },
    // 1.4.a
    EnvelopeRequirements {
        wall_continuous_r_value: 4.0,
        window_u_value: 0.25,
        floor_cavity_r_value: 38.0,
        under_slab_r_value: 10.0,
        total_ua_alternative: Some(15.0),
        eligible_credits: Some(1.0),
        ..ENVELOPE_BASELINE
    },
    // 1.4.b
    EnvelopeRequirements {
        total_ua_alternative: Some(15.0),
        eligible_credits: Some(1.0),
        ..ENVELOPE_BASELINE
    },
    // 1.5.a
    EnvelopeRequirements {
        wall_continuous_r_value: 12.0,
        window_u_value: 0.22,
        floor_cavity_r_value: 38.0,
        under_slab_r_value: 10.0,
        raised_heel: YesNo::Yes,
        total_ua_alternative: Some(30.0),
        eligible_credits: Some(2.0),
        ..ENVELOPE_BASELINE
    },
    // 1.5.b
    EnvelopeRequirements {
        total_ua_alternative: Some(30.0),
        eligible_credits: Some(2.0),
        ..ENVELOPE_BASELINE
    },
    // 1.6.a
    EnvelopeRequirements {
        wall_continuous_r_value: 16.0,
        window_u_value: 0.18,
        floor_cavity_r_value: 48.0,
        slab_perimeter_r_value: 20.0,
        under_slab_r_value: 20.0,
        ceiling_r_value: 60.0,
        raised_heel: YesNo::Yes,
        total_ua_alternative: Some(40.0),
        eligible_credits: Some(3.0),
        ..ENVELOPE_BASELINE
    },
    // 1.6.b
    EnvelopeRequirements {
        total_ua_alternative: Some(40.0),
        eligible_credits: Some(3.0),
        ..ENVELOPE_BASELINE
    },
    // 1.7
    EnvelopeRequirements {
        wall_cavity_r_value: 0.0,
        framing_type: FramingType::Advanced,
        window_u_value: 0.28,
        raised_heel: YesNo::Yes,
        eligible_credits: Some(0.5),
        ..ENVELOPE_BASELINE
    },
];

pub fn envelope(option: BuildingEnvelope) -> &'static EnvelopeRequirements {
    let index = match option {
        BuildingEnvelope::None => 0,
        BuildingEnvelope::Option1p1 => 1,
        BuildingEnvelope::Option1p2 => 2,
        BuildingEnvelope::Option1p3a => 3,
        BuildingEnvelope::Option1p3b => 4,
        BuildingEnvelope::Option1p4a => 5,
        BuildingEnvelope::Option1p4b => 6,
        BuildingEnvelope::Option1p5a => 7,
        BuildingEnvelope::Option1p5b => 8,
        BuildingEnvelope::Option1p6a => 9,
        BuildingEnvelope::Option1p6b => 10,
        BuildingEnvelope::Option1p7 => 11,
    };
    &ENVELOPE[index]
}

// =============================================================================
// Air leakage
// =============================================================================

static AIR_LEAKAGE: [AirLeakageRequirements; 5] = [
    AirLeakageRequirements {
        air_leakage_ach: 5.0,
        ventilation_type: None,
        hrv_asre: None,
        eligible_credits: Some(0.0),
    },
    AirLeakageRequirements {
        air_leakage_ach: 3.0,
        ventilation_type: None,
        hrv_asre: None,
        eligible_credits: Some(0.5),
    },
    AirLeakageRequirements {
        air_leakage_ach: 2.0,
        ventilation_type: Some(VentilationType::HrvErv),
        hrv_asre: Some(65.0),
        eligible_credits: Some(1.0),
    },
    AirLeakageRequirements {
        air_leakage_ach: 1.5,
        ventilation_type: Some(VentilationType::HrvErv),
        hrv_asre: Some(75.0),
        eligible_credits: Some(1.5),
    },
    AirLeakageRequirements {
        air_leakage_ach: 0.6,
        ventilation_type: Some(VentilationType::HrvErv),
        hrv_asre: Some(80.0),
        eligible_credits: Some(2.0),
    },
];

pub fn air_leakage(option: AirLeakageControl) -> &'static AirLeakageRequirements {
    let index = match option {
        AirLeakageControl::None => 0,
        AirLeakageControl::Option2p1 => 1,
        AirLeakageControl::Option2p2 => 2,
        AirLeakageControl::Option2p3 => 3,
        AirLeakageControl::Option2p4 => 4,
    };
    &AIR_LEAKAGE[index]
}

// =============================================================================
// HVAC equipment and distribution
// =============================================================================

const INELIGIBLE_HVAC: HvacRequirements = HvacRequirements {
    furnace_afue: 95.0,
    eligible_credits: None,
};

static HVAC: [HvacRequirements; 7] = [
    HvacRequirements {
        furnace_afue: 95.0,
        eligible_credits: Some(0.0),
    },
    HvacRequirements {
        furnace_afue: 95.0,
        eligible_credits: Some(1.0),
    },
    INELIGIBLE_HVAC,
    INELIGIBLE_HVAC,
    INELIGIBLE_HVAC,
    INELIGIBLE_HVAC,
    INELIGIBLE_HVAC,
];

pub fn hvac(option: HighEfficiencyHvac) -> &'static HvacRequirements {
    let index = match option {
        HighEfficiencyHvac::None => 0,
        HighEfficiencyHvac::Option3p1 => 1,
        HighEfficiencyHvac::Option3p2 => 2,
        HighEfficiencyHvac::Option3p3 => 3,
        HighEfficiencyHvac::Option3p4 => 4,
        HighEfficiencyHvac::Option3p5 => 5,
        HighEfficiencyHvac::Option3p6 => 6,
    };
    &HVAC[index]
}

static HVAC_DISTRIBUTION: [HvacDistributionRequirements; 3] = [
    HvacDistributionRequirements {
        furnace_location: FurnaceLocation::UnconditionedSpace,
        duct_location: DuctLocation::UnconditionedSpace,
        eligible_credits: Some(0.0),
    },
    HvacDistributionRequirements {
        furnace_location: FurnaceLocation::UnconditionedSpace,
        duct_location: DuctLocation::DeeplyBuried,
        eligible_credits: Some(0.5),
    },
    HvacDistributionRequirements {
        furnace_location: FurnaceLocation::ConditionedSpace,
        duct_location: DuctLocation::ConditionedSpace,
        eligible_credits: Some(1.0),
    },
];

pub fn hvac_distribution(
    option: HighEfficiencyHvacDistribution
) -> &'static HvacDistributionRequirements {
    let index = match option {
        HighEfficiencyHvacDistribution::None => 0,
        HighEfficiencyHvacDistribution::Option4p1 => 1,
        HighEfficiencyHvacDistribution::Option4p2 => 2,
    };
    &HVAC_DISTRIBUTION[index]
}

// =============================================================================
// Water
// =============================================================================

static DWHR: [DwhrRequirements; 2] = [
    DwhrRequirements {
        dwhr_installed: None,
        eligible_credits: Some(0.0),
    },
    DwhrRequirements {
        dwhr_installed: Some(YesNo::Yes),
        eligible_credits: Some(0.5),
    },
];

pub fn dwhr(option: Dwhr) -> &'static DwhrRequirements {
    match option {
        Dwhr::None => &DWHR[0],
        Dwhr::Option5p1 => &DWHR[1],
    }
}

static WATER_HEATING: [WaterHeatingRequirements; 6] = [
    WaterHeatingRequirements {
        gas_water_heater_uef: None,
        electric_water_heater_uef: None,
        eligible_credits: Some(0.0),
    },
    WaterHeatingRequirements {
        gas_water_heater_uef: Some(0.91),
        electric_water_heater_uef: None,
        eligible_credits: None,
    },
    WaterHeatingRequirements {
        gas_water_heater_uef: Some(0.91),
        electric_water_heater_uef: None,
        eligible_credits: Some(1.0),
    },
    WaterHeatingRequirements {
        gas_water_heater_uef: None,
        electric_water_heater_uef: Some(2.0),
        eligible_credits: Some(1.5),
    },
    WaterHeatingRequirements {
        gas_water_heater_uef: None,
        electric_water_heater_uef: Some(2.6),
        eligible_credits: Some(2.0),
    },
    WaterHeatingRequirements {
        gas_water_heater_uef: None,
        electric_water_heater_uef: Some(2.9),
        eligible_credits: Some(2.5),
    },
];

pub fn water_heating(option: EfficientWaterHeating) -> &'static WaterHeatingRequirements {
    let index = match option {
        EfficientWaterHeating::None => 0,
        EfficientWaterHeating::Option5p2 => 1,
        EfficientWaterHeating::Option5p3 => 2,
        EfficientWaterHeating::Option5p4 => 3,
        EfficientWaterHeating::Option5p5 => 4,
        EfficientWaterHeating::Option5p6 => 5,
    };
    &WATER_HEATING[index]
}

/// Water heating options allowed for the declared fuel.
pub fn water_heating_options_for(fuel: WaterHeatingFuel) -> &'static [EfficientWaterHeating] {
    match fuel {
        WaterHeatingFuel::Gas => &[EfficientWaterHeating::Option5p3],
        WaterHeatingFuel::Electric => &[
            EfficientWaterHeating::Option5p4,
            EfficientWaterHeating::Option5p5,
            EfficientWaterHeating::Option5p6,
        ],
    }
}

// =============================================================================
// Credit-only categories
// =============================================================================

pub fn renewable_energy_credits(option: RenewableEnergy) -> Option<f64> {
    match option {
        RenewableEnergy::None => Some(0.0),
        RenewableEnergy::Option6p1a => Some(1.0),
        RenewableEnergy::Option6p1b => Some(2.0),
        RenewableEnergy::Option6p1c => Some(3.0),
    }
}

pub fn appliance_credits(option: Appliances) -> Option<f64> {
    match option {
        Appliances::None => Some(0.0),
        Appliances::Option7p1 => Some(0.5),
    }
}
