//! CSV loader for batches of checklists.
//!
//! ## CSV Format
//!
//! One home per row. The header row holds checklist question ids, with or
//! without the `wcc-` prefix, in any order. Cells are validated with the same
//! rules as [`build_input`]; empty cells count as unanswered.
//!
//! Columns that are not checklist questions are ignored.
//!
//! ### Minimal example
//!
//! ```csv
//! envelope_option,air_leakage_option,hvac_option,...,dwhr_installed
//! NONE,NONE,OPTION_3p1,...,No
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;
use wcc_core::CalculatorInput;

use crate::checklist::{build_input, ValidationErrors};

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading checklists from CSV.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The CSV itself is malformed (ragged rows, bad encoding, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A row parsed but failed checklist validation. `row` is 1-based, not
    /// counting the header.
    #[error("invalid checklist on row {row}: {errors}")]
    Invalid { row: usize, errors: ValidationErrors },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Parse CSV text and return one input per row, in file order.
///
/// # Errors
///
/// * [`LoadError::Parse`] if the CSV is structurally invalid.
/// * [`LoadError::Invalid`] for the first row that fails validation.
pub fn load_from_str(input: &str) -> Result<Vec<CalculatorInput>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let inputs = reader
        .deserialize::<BTreeMap<String, String>>()
        .enumerate()
        .map(|(idx, result)| {
            let answers = result?;
            let row = idx + 1;
            build_input(&answers).map_err(|errors| LoadError::Invalid { row, errors })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(homes = inputs.len(), "loaded checklists");
    Ok(inputs)
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<CalculatorInput>, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let inputs = load_from_str(&contents)?;
    Ok(inputs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
