//! Boundary layer for the code credit calculator.
//!
//! Turns raw checklist answers (single maps or CSV batches) into
//! [`wcc_core::CalculatorInput`] values and renders calculations as text or
//! JSON.

pub mod checklist;
pub mod config;
pub mod loader;
pub mod logging;
pub mod output;

pub use checklist::{FieldError, ValidationErrors, build_input};
pub use config::{CliConfig, ConfigError, OutputFormat, ReportSection};
pub use loader::{LoadError, load_from_file, load_from_str};
pub use output::OutputDocument;
