//! Loads checklist fixtures and runs them through the calculator.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::Value;
use wcc_core::{CalculatorInput, CodeCreditCalculator, ProgramConfig, WaterHeatingFuel};
use wcc_data::{
    CliConfig, FieldError, LoadError, OutputDocument, ReportSection, load_from_str, output,
};

const HOMES_CSV: &str = include_str!("../test-data/homes.csv");
const INVALID_HOMES_CSV: &str = include_str!("../test-data/invalid_homes.csv");

fn load_homes() -> Vec<CalculatorInput> {
    load_from_str(HOMES_CSV).expect("fixture should load")
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn fixture_loads_every_home() {
    let homes = load_homes();

    assert_eq!(homes.len(), 3);
    assert_eq!(homes[0].home.water_heating_fuel, Some(WaterHeatingFuel::Electric));
    assert_eq!(homes[1].home.water_heating_fuel, Some(WaterHeatingFuel::Gas));
    assert_eq!(homes[1].envelope.window_shgc, 0.0);
    assert_eq!(homes[2].hvac.furnace_brand, None);
}

#[test]
fn invalid_fixture_reports_second_row() {
    let err = load_from_str(INVALID_HOMES_CSV).unwrap_err();

    let (row, errors) = match err {
        LoadError::Invalid { row, errors } => (row, errors),
        other => panic!("expected a validation failure, got {other:?}"),
    };

    assert_eq!(row, 2);
    assert_eq!(
        errors.errors(),
        &[
            FieldError::OutOfRange {
                field: "conditioned_floor_area",
                value: 9000.0,
                min: 500.0,
                max: 6000.0,
            },
            FieldError::UnknownChoice {
                field: "thermostat_type",
                value: "Thermostat".to_string(),
            },
            FieldError::FuelRequiresUef {
                fuel: WaterHeatingFuel::Electric,
                required: "Electric Heater UEF",
            },
        ]
    );
}

// =============================================================================
// Calculation
// =============================================================================

#[test]
fn fixture_homes_calculate_expected_incentives() {
    let calculator = CodeCreditCalculator::default();
    let homes = load_homes();

    let electric = calculator.calculate(&homes[0]);
    assert_eq!(electric.summary.achieved_total_credits, 13.5);
    assert_eq!(electric.summary.eligible_gas_points, 1.5);
    assert_eq!(electric.summary.total_builder_incentive, dec!(2725.00));
    assert_eq!(electric.summary.total_therm_savings, 141.3);
    assert!(electric.warnings().is_empty());

    let gas = calculator.calculate(&homes[1]);
    assert_eq!(gas.summary.achieved_total_credits, 7.0);
    assert_eq!(gas.summary.eligible_gas_points, 1.0);
    assert_eq!(gas.summary.total_builder_incentive, dec!(1600.00));
    assert_eq!(gas.summary.verifier_incentive, dec!(100.00));
    assert_eq!(gas.summary.total_therm_savings, 68.56);

    let minimal = calculator.calculate(&homes[2]);
    assert_eq!(minimal.summary.eligible_gas_points, 0.0);
    assert_eq!(minimal.summary.total_builder_incentive, dec!(0));
    assert_eq!(minimal.summary.verifier_incentive, dec!(0));
}

#[test]
fn configured_rates_flow_into_incentives() {
    let config = CliConfig::from_toml(
        r#"
[program.incentives]
credit_rate = 500.0
verifier = 150.0
"#,
    )
    .unwrap();
    let calculator = CodeCreditCalculator::new(config.program).unwrap();
    let homes = load_homes();

    let gas = calculator.calculate(&homes[1]);

    assert_eq!(gas.summary.code_credit_incentive, dec!(1000.00));
    assert_eq!(gas.summary.verifier_incentive, dec!(150.00));
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn json_document_carries_submission_record() {
    let calculator = CodeCreditCalculator::new(ProgramConfig::default()).unwrap();
    let homes = load_homes();
    let calculation = calculator.calculate(&homes[1]);

    let json = output::to_json(&[OutputDocument::new(2, &calculation)]).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    let document = &value[0];

    assert_eq!(document["row"], Value::from(2));
    assert_eq!(document["summary_data"]["eligible_gas_points"], Value::from(1.0));
    assert_eq!(document["submission"]["therm_savings"], Value::from(68.56));
    assert_eq!(document["submission"]["builder_incentive"], Value::from(1600.0));
    assert_eq!(document["submission"]["rater_incentive"], Value::from(100.0));
    assert_eq!(document["credit_data"]["total"]["achieved"], Value::from(7.0));
    assert_eq!(document["input"]["water_heating_fuel"], Value::from("Gas"));
    assert_eq!(
        document["specification_data"]["water"]["meets_water_heater_requirements"],
        Value::from(true)
    );
}

#[test]
fn dumped_input_replays_to_the_same_calculation() {
    let calculator = CodeCreditCalculator::default();
    let homes = load_homes();

    let json = output::dump_input(&homes[0]).unwrap();
    let replayed: CalculatorInput = serde_json::from_str(&json).unwrap();

    assert_eq!(replayed, homes[0]);
    assert_eq!(calculator.calculate(&replayed), calculator.calculate(&homes[0]));
}

#[test]
fn text_output_renders_requested_sections() {
    let calculator = CodeCreditCalculator::default();
    let homes = load_homes();
    let calculation = calculator.calculate(&homes[0]);

    let text = output::render_text(
        &calculation,
        &[ReportSection::Summary, ReportSection::Specifications],
    );

    assert!(text.contains("Home Summary"));
    assert!(text.contains("1. Building Elements"));
    assert!(text.contains("5. Efficient Water Heating"));
    assert!(!text.contains("Code Based Therm Savings"));
}
