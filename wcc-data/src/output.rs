//! Output documents for calculated homes.
//!
//! JSON output keeps the engine's namespaces and adds the persisted record:
//!
//! | Key                  | Contents |
//! |----------------------|----------|
//! | `row`                | 1-based source row |
//! | `input`              | normalized checklist answers |
//! | `summary_data`       | headline numbers |
//! | `credit_data`        | eligible/achieved per category plus `total` |
//! | `incentive_data`     | dollar amounts |
//! | `savings_data`       | therm savings |
//! | `specification_data` | per-category measure verdicts |
//! | `submission`         | values stored against the home |
//! | `warnings`           | every specification warning |

use serde::Serialize;
use wcc_core::{Calculation, CalculatorInput, Report, SubmissionRecord};

use crate::config::ReportSection;

#[derive(Debug, Serialize)]
pub struct OutputDocument<'a> {
    pub row: usize,

    #[serde(flatten)]
    pub calculation: &'a Calculation,

    pub submission: SubmissionRecord,

    pub warnings: Vec<String>,
}

impl<'a> OutputDocument<'a> {
    pub fn new(row: usize, calculation: &'a Calculation) -> Self {
        Self {
            row,
            calculation,
            submission: SubmissionRecord::from(&calculation.summary),
            warnings: calculation.warnings(),
        }
    }
}

/// Pretty-printed JSON array of documents.
pub fn to_json(documents: &[OutputDocument<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(documents)
}

/// Pretty-printed input, suitable for replaying a calculation.
pub fn dump_input(input: &CalculatorInput) -> serde_json::Result<String> {
    serde_json::to_string_pretty(input)
}

/// Text report made of the requested sections, in the order given.
pub fn render_text(
    calculation: &Calculation,
    sections: &[ReportSection],
) -> String {
    sections
        .iter()
        .map(|section| match section {
            ReportSection::Input => calculation.input.report(),
            ReportSection::Summary => calculation.summary.report(),
            ReportSection::Credits => calculation.credits.report(),
            ReportSection::Incentives => calculation.incentives.report(),
            ReportSection::Savings => calculation.savings.report(),
            ReportSection::Specifications => calculation.specifications.report(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
