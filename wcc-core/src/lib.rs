//! Washington Code Credit calculation engine.
//!
//! Given the worksheet option selections and the as-built measurements of a
//! new home, the engine grades each category, totals code credits, derives
//! gas-eligible points and prices the resulting builder and verifier
//! incentives and therm savings. It performs no I/O.

pub mod calculations;
pub mod catalog;
pub mod models;
pub mod report;

pub use calculations::{Calculation, CodeCreditCalculator, ProgramConfig, ProgramConfigError};
pub use models::*;
pub use report::Report;
