//! Plain-text reports for each calculation stage.
//!
//! Reports are presentation only. Nothing in [`crate::calculations`] depends
//! on this module.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;
use crate::calculations::{
    Calculation, CategoryCompliance, CreditLedger, IncentiveRecord, SavingsRecord,
    Specifications, Summary,
};
use crate::models::CalculatorInput;

/// Renders a value as a human readable text block.
pub trait Report {
    fn report(&self) -> String;
}

// =============================================================================
// Table rendering
// =============================================================================

/// Left-aligned text table with a dashed rule under the header.
#[derive(Debug)]
struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    fn row<I, S>(
        &mut self,
        cells: I,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(width) => *width = (*width).max(len),
                    None => widths.push(len),
                }
            }
        }

        let mut out = String::new();
        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        push_line(&mut out, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(
    out: &mut String,
    cells: &[String],
    widths: &[usize],
) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn money(value: Decimal) -> String {
    format!("${:.2}", round_half_up(value))
}

fn credits(value: Option<f64>) -> String {
    value.map_or_else(|| "DNQ".to_string(), |v| format!("{v:.1}"))
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// `wall_cavity_r_value` -> `Wall Cavity R Value`.
fn humanize(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

// =============================================================================
// Stage reports
// =============================================================================

impl Report for CategoryCompliance {
    fn report(&self) -> String {
        let mut table = Table::new(&[
            "Section",
            "Label",
            "Minimum",
            "Installed",
            "Meets",
            "Warning",
        ]);
        for measure in &self.measures {
            table.row([
                measure.section.to_string(),
                measure.label.to_string(),
                measure.minimum_requirement.to_string(),
                measure.installed.to_string(),
                yes_no(measure.meets_requirement).to_string(),
                measure.warning.clone().unwrap_or_default(),
            ]);
        }

        format!(
            "{}\n  Option Selected: {}\n\n{}\nMeets Requirements? {}\n",
            self.title,
            self.options_selected.join(" / "),
            table.render(),
            yes_no(self.meet_requirements)
        )
    }
}

impl Report for Specifications {
    fn report(&self) -> String {
        self.categories()
            .iter()
            .map(|category| category.report())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Report for CreditLedger {
    fn report(&self) -> String {
        let mut table = Table::new(&["Category", "Eligible", "Achieved"]);
        for (label, entry) in self.entries() {
            table.row([label.to_string(), credits(entry.eligible), credits(entry.achieved)]);
        }
        table.row([
            "Total".to_string(),
            format!("{:.1}", self.total.eligible),
            format!("{:.1}", self.total.achieved),
        ]);
        table.render()
    }
}

impl Report for IncentiveRecord {
    fn report(&self) -> String {
        let mut table = Table::new(&["Incentive", "Amount"]);
        table.row(["Code Credit Incentive".to_string(), money(self.code_credit_incentive)]);
        table.row(["Thermostat Incentive".to_string(), money(self.thermostat_incentive)]);
        table.row(["Fireplace Incentive".to_string(), money(self.fireplace_incentive)]);
        table.row([
            "Total Builder Incentive".to_string(),
            money(self.total_builder_incentive),
        ]);
        table.row(["Verifier Incentive".to_string(), money(self.verifier_incentive)]);
        table.render()
    }
}

impl Report for SavingsRecord {
    fn report(&self) -> String {
        let mut table = Table::new(&["Savings", "Therms"]);
        table.row(["Eligible Gas Points".to_string(), self.eligible_gas_points.to_string()]);
        table.row([
            "Code Based Therm Savings".to_string(),
            format!("{:.2}", self.code_based_therm_savings),
        ]);
        table.row([
            "Thermostat Therm Savings".to_string(),
            format!("{:.2}", self.thermostat_therm_savings),
        ]);
        table.row([
            "Fireplace Therm Savings".to_string(),
            format!("{:.2}", self.fireplace_therm_savings),
        ]);
        table.row([
            "Total Therm Savings".to_string(),
            format!("{:.2}", self.total_therm_savings),
        ]);
        table.render()
    }
}

impl Report for Summary {
    fn report(&self) -> String {
        let mut home = Table::new(&["Home Summary", ""]);
        home.row([
            "Conditioned Floor Area".to_string(),
            self.conditioned_floor_area.to_string(),
        ]);
        home.row(["Water Heating Fuel".to_string(), optional(self.water_heating_fuel)]);
        home.row(["Thermostat Type".to_string(), optional(self.thermostat_type)]);
        home.row(["Fireplace Efficiency".to_string(), self.fireplace_efficiency.to_string()]);

        let mut code = Table::new(&["Code Credits", ""]);
        code.row([
            "Required Credits".to_string(),
            self.required_credits_to_meet_code.to_string(),
        ]);
        code.row(["Achieved Credits".to_string(), format!("{:.1}", self.achieved_total_credits)]);
        code.row(["Eligible Gas Points".to_string(), self.eligible_gas_points.to_string()]);
        code.row(["Total Therm Savings".to_string(), format!("{:.2}", self.total_therm_savings)]);

        let mut incentives = Table::new(&["Incentives", ""]);
        incentives.row(["Code Credit".to_string(), money(self.code_credit_incentive)]);
        incentives.row(["Thermostat".to_string(), money(self.thermostat_incentive)]);
        incentives.row(["Fireplace".to_string(), money(self.fireplace_incentive)]);
        incentives.row(["Total Builder".to_string(), money(self.total_builder_incentive)]);
        incentives.row(["Verifier".to_string(), money(self.verifier_incentive)]);

        format!(
            "{}\n{}\n{}",
            home.render(),
            code.render(),
            incentives.render()
        )
    }
}

impl Report for CalculatorInput {
    fn report(&self) -> String {
        let options = &self.options;
        let home = &self.home;
        let envelope = &self.envelope;
        let air = &self.air_leakage;
        let hvac = &self.hvac;
        let distribution = &self.hvac_distribution;
        let water = &self.water;

        let rows: Vec<(&str, String)> = vec![
            ("envelope_option", options.envelope_option.to_string()),
            ("air_leakage_option", options.air_leakage_option.to_string()),
            ("hvac_option", options.hvac_option.to_string()),
            ("hvac_distribution_option", options.hvac_distribution_option.to_string()),
            ("dwhr_option", options.dwhr_option.to_string()),
            ("water_heating_option", options.water_heating_option.to_string()),
            ("renewable_electric_option", options.renewable_electric_option.to_string()),
            ("appliance_option", options.appliance_option.to_string()),
            ("conditioned_floor_area", home.conditioned_floor_area.to_string()),
            ("water_heating_fuel", optional(home.water_heating_fuel)),
            ("thermostat_type", optional(home.thermostat_type)),
            ("fireplace_efficiency", home.fireplace_efficiency.to_string()),
            ("wall_cavity_r_value", envelope.wall_cavity_r_value.to_string()),
            ("wall_continuous_r_value", envelope.wall_continuous_r_value.to_string()),
            ("framing_type", optional(envelope.framing_type)),
            ("window_u_value", envelope.window_u_value.to_string()),
            ("window_shgc", envelope.window_shgc.to_string()),
            ("floor_cavity_r_value", envelope.floor_cavity_r_value.to_string()),
            ("slab_perimeter_r_value", envelope.slab_perimeter_r_value.to_string()),
            ("under_slab_r_value", envelope.under_slab_r_value.to_string()),
            ("ceiling_r_value", envelope.ceiling_r_value.to_string()),
            ("raised_heel", optional(envelope.raised_heel)),
            ("total_ua_alternative", optional(envelope.total_ua_alternative)),
            ("air_leakage_ach", air.air_leakage_ach.to_string()),
            ("ventilation_type", optional(air.ventilation_type)),
            ("ventilation_brand", optional(air.ventilation_brand.as_deref())),
            ("ventilation_model", optional(air.ventilation_model.as_deref())),
            ("hrv_asre", air.hrv_asre.to_string()),
            ("furnace_brand", optional(hvac.furnace_brand.as_deref())),
            ("furnace_model", optional(hvac.furnace_model.as_deref())),
            ("furnace_afue", optional(hvac.furnace_afue)),
            ("furnace_location", optional(distribution.furnace_location)),
            ("duct_location", optional(distribution.duct_location)),
            ("duct_leakage", optional(distribution.duct_leakage)),
            ("dwhr_installed", optional(water.dwhr_installed)),
            ("water_heater_brand", optional(water.water_heater_brand.as_deref())),
            ("water_heater_model", optional(water.water_heater_model.as_deref())),
            ("gas_water_heater_uef", optional(water.gas_water_heater_uef)),
            ("electric_water_heater_uef", optional(water.electric_water_heater_uef)),
        ];

        let mut table = Table::new(&["Input", "Value"]);
        for (key, value) in rows {
            table.row([humanize(key), value]);
        }
        table.render()
    }
}

impl Report for Calculation {
    fn report(&self) -> String {
        [
            self.summary.report(),
            self.credits.report(),
            self.incentives.report(),
            self.savings.report(),
            self.specifications.report(),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::{CodeCreditCalculator, CreditEntry, CreditTotals};
    use crate::models::HighEfficiencyHvac;

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn humanize_keys() {
        assert_eq!(humanize("wall_cavity_r_value"), "Wall Cavity R Value");
        assert_eq!(humanize("hrv_asre"), "Hrv Asre");
    }

    #[test]
    fn money_has_two_places() {
        assert_eq!(money(dec!(2400)), "$2400.00");
        assert_eq!(money(dec!(0)), "$0.00");
    }

    #[test]
    fn table_pads_columns() {
        let mut table = Table::new(&["A", "Long header"]);
        table.row(["wide cell", "x"]);

        assert_eq!(
            table.render(),
            "A          Long header\n---------  -----------\nwide cell  x\n"
        );
    }

    // =========================================================================
    // Stage report tests
    // =========================================================================

    #[test]
    fn credit_report_marks_dnq() {
        let entry = CreditEntry {
            eligible: Some(1.0),
            achieved: Some(1.0),
        };
        let ledger = CreditLedger {
            building_envelope: entry,
            air_leakage: entry,
            hvac: CreditEntry {
                eligible: None,
                achieved: None,
            },
            hvac_distribution: entry,
            dwhr: entry,
            water_heater: entry,
            renewables: entry,
            appliances: entry,
            total: CreditTotals {
                eligible: 0.0,
                achieved: 0.0,
            },
        };

        let report = ledger.report();

        assert!(report.contains("DNQ"));
        assert!(report.lines().last().unwrap().starts_with("Total"));
    }

    #[test]
    fn incentive_report_formats_dollars() {
        let record = IncentiveRecord {
            code_credit_incentive: dec!(2400),
            thermostat_incentive: dec!(125),
            fireplace_incentive: dec!(200),
            total_builder_incentive: dec!(2725),
            verifier_incentive: dec!(100),
        };

        let report = record.report();

        assert!(report.contains("$2725.00"));
        assert!(report.contains("$100.00"));
    }

    #[test]
    fn category_report_has_heading_and_verdict() {
        let mut input = CalculatorInput::default();
        input.options.hvac_option = HighEfficiencyHvac::Option3p1;
        input.hvac.furnace_afue = Some(96.0);

        let calculation = CodeCreditCalculator::default().calculate(&input);
        let report = calculation.specifications.hvac.report();

        assert!(report.starts_with(
            "3. High Efficiency HVAC Equipment\n  Option Selected: 3.1: REQUIRED - 95 AFUE\n"
        ));
        assert!(report.ends_with("Meets Requirements? Yes\n"));
    }

    #[test]
    fn full_report_contains_every_section() {
        let calculation = CodeCreditCalculator::default().calculate(&CalculatorInput::default());

        let report = calculation.report();

        for heading in [
            "Home Summary",
            "Code Credits",
            "Incentives",
            "1. Building Elements",
            "2. Air Leakage Control & Efficient Ventilation",
            "3. High Efficiency HVAC Equipment",
            "4. High Efficiency HVAC Distribution",
            "5. Efficient Water Heating",
        ] {
            assert!(report.contains(heading), "missing {heading}");
        }
    }

    #[test]
    fn input_report_lists_every_field() {
        let report = CalculatorInput::default().report();

        assert!(report.contains("Conditioned Floor Area"));
        assert!(report.contains("Electric Water Heater Uef"));
        assert_eq!(report.lines().count(), 2 + 39);
    }
}
