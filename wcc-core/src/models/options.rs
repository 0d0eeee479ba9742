//! Enumerated choices used by the Washington Code Credit program.
//!
//! Every enum carries two spellings:
//!
//! | Spelling | Example | Used by |
//! |----------|---------|---------|
//! | label    | `1.6.a: U0.18 windows, ...` | checklist answers, reports, JSON |
//! | key      | `OPTION_1p6a` | annotations and replayed inputs |
//!
//! [`parse`](BuildingEnvelope::parse) accepts either spelling so callers can
//! normalize raw answers before they reach the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a raw answer does not name any member of an enum.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{value}' is not a valid {kind}")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($key:literal, $label:literal),
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Human readable label.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Member key, e.g. `NONE`.
            pub fn key(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            /// Matches either the label or the key exactly.
            pub fn parse(s: &str) -> Option<Self> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| member.as_str() == s || member.key() == s)
            }

            /// Same as [`Self::parse`] but ignores ASCII case.
            pub fn parse_ignore_case(s: &str) -> Option<Self> {
                let s = s.trim();
                Self::ALL.iter().copied().find(|member| {
                    member.as_str().eq_ignore_ascii_case(s) || member.key().eq_ignore_ascii_case(s)
                })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseOptionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s).ok_or_else(|| ParseOptionError {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }
    };
}

// =============================================================================
// Credit categories
// =============================================================================

labeled_enum! {
    /// Section 1: efficient building envelope.
    #[derive(Default)]
    pub enum BuildingEnvelope: "building envelope option" {
        #[default]
        None => ("NONE", "None"),
        Option1p1 => ("OPTION_1p1", "1.1: U-0.24 windows"),
        Option1p2 => ("OPTION_1p2", "1.2: U-0.20 windows"),
        Option1p3a => ("OPTION_1p3a", "1.3.a: U-0.28 windows + R38 floor or R10 slabs"),
        Option1p3b => ("OPTION_1p3b", "1.3.b: 5% UA Reduction"),
        Option1p4a => ("OPTION_1p4a", "1.4.a: U-0.25 windows, R21+R4ci walls, R38 floor or R10 slabs"),
        Option1p4b => ("OPTION_1p4b", "1.4.b: 15% UA Reduction"),
        Option1p5a => ("OPTION_1p5a", "1.5.a: U-0.22 windows, ceiling/vaults R-49, R21+R12ci walls, R38 floor or R10 slabs"),
        Option1p5b => ("OPTION_1p5b", "1.5.b: 30% UA reduction"),
        Option1p6a => ("OPTION_1p6a", "1.6.a: U0.18 windows, ceiling/vaults R60, R21+R16ci walls, R48 floor or R20 slabs"),
        Option1p6b => ("OPTION_1p6b", "1.6.b: 40% UA reduction"),
        Option1p7 => ("OPTION_1p7", "1.7: Adv Framing, U.28 windows, Full R49 ceiling"),
    }
}

labeled_enum! {
    /// Section 2: air leakage control and efficient ventilation.
    #[derive(Default)]
    pub enum AirLeakageControl: "air leakage option" {
        #[default]
        None => ("NONE", "None"),
        Option2p1 => ("OPTION_2p1", "2.1: 3 ACH Eff vent. fan, R402.4.1.2"),
        Option2p2 => ("OPTION_2p2", "2.2: 2 ACH Eff, 65% HRV vent., R402.4.1.2"),
        Option2p3 => ("OPTION_2p3", "2.3: 1.5 ACH Eff, 75% HRV vent., R402.4.1.2"),
        Option2p4 => ("OPTION_2p4", "2.4: 0.6 ACH Eff, 80% HRV vent, R402.4.1.3"),
    }
}

labeled_enum! {
    /// Section 3: high efficiency HVAC equipment.
    ///
    /// Options 3.2 through 3.6 exist on the state form but are not creditable
    /// under this program.
    #[derive(Default)]
    pub enum HighEfficiencyHvac: "HVAC option" {
        #[default]
        None => ("NONE", "None"),
        Option3p1 => ("OPTION_3p1", "3.1: REQUIRED - 95 AFUE"),
        Option3p2 => ("OPTION_3p2", "3.2: INELIGIBLE SELECTION"),
        Option3p3 => ("OPTION_3p3", "3.3: INELIGIBLE SELECTION"),
        Option3p4 => ("OPTION_3p4", "3.4: INELIGIBLE SELECTION"),
        Option3p5 => ("OPTION_3p5", "3.5: INELIGIBLE SELECTION"),
        Option3p6 => ("OPTION_3p6", "3.6: INELIGIBLE SELECTION"),
    }
}

labeled_enum! {
    /// Section 4: high efficiency HVAC distribution.
    #[derive(Default)]
    pub enum HighEfficiencyHvacDistribution: "HVAC distribution option" {
        #[default]
        None => ("NONE", "None"),
        Option4p1 => ("OPTION_4p1", "4.1: Deeply Buried Ducts"),
        Option4p2 => ("OPTION_4p2", "4.2: HVAC & Ducts In Conditioned Space"),
    }
}

labeled_enum! {
    /// Section 5.1: drain water heat recovery.
    #[derive(Default)]
    pub enum Dwhr: "DWHR option" {
        #[default]
        None => ("NONE", "None"),
        Option5p1 => ("OPTION_5p1", "5.1: Drain Water Heat Recovery"),
    }
}

labeled_enum! {
    /// Sections 5.2 through 5.6: efficient water heating.
    #[derive(Default)]
    pub enum EfficientWaterHeating: "water heating option" {
        #[default]
        None => ("NONE", "None"),
        Option5p2 => ("OPTION_5p2", "5.2: INELIGIBLE SELECTION"),
        Option5p3 => ("OPTION_5p3", "5.3: GAS - UEF 0.91 (REQUIRED FOR GAS DHW)"),
        Option5p4 => ("OPTION_5p4", "5.4: ELEC - NEEA QPL Tier I"),
        Option5p5 => ("OPTION_5p5", "5.5: ELEC - NEEA QPL Tier III"),
        Option5p6 => ("OPTION_5p6", "5.6: ELEC - Split HP w/ UEF 2.9"),
    }
}

labeled_enum! {
    /// Section 6: renewable electric generation.
    #[derive(Default)]
    pub enum RenewableEnergy: "renewable energy option" {
        #[default]
        None => ("NONE", "None"),
        Option6p1a => ("OPTION_6p1a", "6.1: Renewable Generation - x1 - 1,200 - 2,399 kWh"),
        Option6p1b => ("OPTION_6p1b", "6.1: Renewable Generation - x2 - 2,400 - 3,599 kWh"),
        Option6p1c => ("OPTION_6p1c", "6.1: Renewable Generation - x3 - >3,600 kWh"),
    }
}

labeled_enum! {
    /// Section 7: appliance package.
    #[derive(Default)]
    pub enum Appliances: "appliance option" {
        #[default]
        None => ("NONE", "None"),
        Option7p1 => ("OPTION_7p1", "7.1: ENERGY STAR dishwasher, refrigerator, washer, ventless dryer CEF >5.2"),
    }
}

// =============================================================================
// Home facts
// =============================================================================

labeled_enum! {
    pub enum WaterHeatingFuel: "water heating fuel" {
        Gas => ("GAS", "Gas"),
        Electric => ("ELECTRIC", "Electric"),
    }
}

labeled_enum! {
    /// Installed thermostat. Raw answers are matched without regard to case.
    pub enum ThermostatType: "thermostat type" {
        Programmable => ("PROGRAMABLE", "Programmable"),
        ProgrammableWifi => ("PROGRAMABLE_WIFI", "Programmable + Wi-fi"),
        Bryant => ("BRYANT", "Bryant: Housewise Wi-Fi"),
        Carrier => ("CARRIER", "Carrier: Cor Wi-Fi"),
        Ecobee3 => ("ECOBEE3", "ecobee3 (Not ecobee 3 lite)"),
        Ecobee4 => ("ECOBEE4", "ecobee4"),
        EcobeeVoice => ("ECOBEE_VOICE", "ecobee: Smart Thermostat with Voice Control"),
        NestLearning => ("NEST_LEARNING", "Nest: Learning Thermostat (all generations)"),
        Nest => ("NEST", "Nest Thermostat"),
        NestE => ("NEST_E", "Nest: Thermostat E"),
        Other => ("OTHER", "Smart, Other"),
    }
}

impl ThermostatType {
    /// Whether this thermostat qualifies for the smart thermostat incentive.
    pub fn is_smart(&self) -> bool {
        !matches!(self, Self::Programmable | Self::ProgrammableWifi | Self::Other)
    }
}

labeled_enum! {
    #[derive(Default)]
    pub enum FireplaceType: "fireplace efficiency" {
        #[default]
        None => ("NONE", "None"),
        LessThan70 => ("FP_LT70", "<70 FE"),
        From70To75 => ("FP_70_75", "70-75 FE"),
        GreaterThan75 => ("FP_GT75", ">75 FE"),
    }
}

impl FireplaceType {
    /// The two tiers eligible for the fireplace incentive.
    pub fn is_high_efficiency(&self) -> bool {
        matches!(self, Self::From70To75 | Self::GreaterThan75)
    }
}

// =============================================================================
// Measured categorical values
// =============================================================================

labeled_enum! {
    pub enum FramingType: "framing type" {
        Intermediate => ("INTERMEDIATE", "Intermediate"),
        Advanced => ("ADVANCED", "Advanced"),
    }
}

labeled_enum! {
    pub enum VentilationType: "ventilation type" {
        ExhaustOnly => ("EXHAUST_ONLY", "Exhaust Only"),
        SupplyOnly => ("SUPPLY_ONLY", "Supply Only"),
        Balanced => ("BALANCED", "Balanced (no recovery)"),
        HrvErv => ("HRV_ERV", "HRV/ERV"),
    }
}

labeled_enum! {
    pub enum FurnaceLocation: "furnace location" {
        UnconditionedSpace => ("UNCONDITIONED_SPACE", "Unconditioned Space"),
        ConditionedSpace => ("CONDITIONED_SPACE", "Conditioned Space"),
    }
}

labeled_enum! {
    pub enum DuctLocation: "duct location" {
        UnconditionedSpace => ("UNCONDITIONED_SPACE", "Unconditioned Space"),
        ConditionedSpace => ("CONDITIONED_SPACE", "Conditioned Space"),
        DeeplyBuried => ("DEEPLY_BURIED", "Deeply Buried"),
    }
}

impl DuctLocation {
    /// Ordinal used to compare duct placement; higher is better.
    pub fn rank(&self) -> u8 {
        match self {
            Self::UnconditionedSpace => 1,
            Self::DeeplyBuried => 2,
            Self::ConditionedSpace => 3,
        }
    }
}

labeled_enum! {
    pub enum YesNo: "yes/no answer" {
        Yes => ("YES", "Yes"),
        No => ("NO", "No"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // parse tests
    // =========================================================================

    #[test]
    fn parse_accepts_label() {
        let parsed = BuildingEnvelope::parse("1.3.b: 5% UA Reduction");

        assert_eq!(parsed, Some(BuildingEnvelope::Option1p3b));
    }

    #[test]
    fn parse_accepts_member_key() {
        assert_eq!(
            EfficientWaterHeating::parse("OPTION_5p6"),
            Some(EfficientWaterHeating::Option5p6)
        );
        assert_eq!(Dwhr::parse("NONE"), Some(Dwhr::None));
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        assert_eq!(YesNo::parse("  Yes "), Some(YesNo::Yes));
    }

    #[test]
    fn parse_rejects_unknown_value() {
        assert_eq!(Appliances::parse("7.2: Something else"), None);
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(ThermostatType::parse("ECOBEE4"), Some(ThermostatType::Ecobee4));
        assert_eq!(ThermostatType::parse("Ecobee4"), None);
    }

    #[test]
    fn parse_ignore_case_matches_any_case() {
        assert_eq!(
            ThermostatType::parse_ignore_case("NEST THERMOSTAT"),
            Some(ThermostatType::Nest)
        );
        assert_eq!(
            ThermostatType::parse_ignore_case("programmable + WI-FI"),
            Some(ThermostatType::ProgrammableWifi)
        );
    }

    #[test]
    fn from_str_reports_kind_and_value() {
        let err = "Propane".parse::<WaterHeatingFuel>().unwrap_err();

        assert_eq!(err.to_string(), "'Propane' is not a valid water heating fuel");
    }

    #[test]
    fn labels_are_unique_within_each_enum() {
        for (i, a) in BuildingEnvelope::ALL.iter().enumerate() {
            for b in &BuildingEnvelope::ALL[i + 1..] {
                assert!(a.as_str() != b.as_str(), "{a:?} and {b:?} share a label");
            }
        }
    }

    // =========================================================================
    // helper tests
    // =========================================================================

    #[test]
    fn smart_thermostats() {
        assert!(!ThermostatType::Programmable.is_smart());
        assert!(!ThermostatType::ProgrammableWifi.is_smart());
        assert!(!ThermostatType::Other.is_smart());
        assert!(ThermostatType::Ecobee4.is_smart());
        assert!(ThermostatType::NestE.is_smart());
    }

    #[test]
    fn high_efficiency_fireplaces() {
        assert!(!FireplaceType::None.is_high_efficiency());
        assert!(!FireplaceType::LessThan70.is_high_efficiency());
        assert!(FireplaceType::From70To75.is_high_efficiency());
        assert!(FireplaceType::GreaterThan75.is_high_efficiency());
    }

    #[test]
    fn duct_location_rank_orders_placements() {
        assert!(DuctLocation::UnconditionedSpace.rank() < DuctLocation::DeeplyBuried.rank());
        assert!(DuctLocation::DeeplyBuried.rank() < DuctLocation::ConditionedSpace.rank());
    }
}
