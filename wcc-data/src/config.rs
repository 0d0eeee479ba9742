//! TOML configuration for the calculator CLI.
//!
//! Every key is optional. A file that only overrides one rate is valid:
//!
//! ```toml
//! log_level = "debug"
//!
//! [output]
//! format = "json"
//! reports = ["summary", "credits"]
//!
//! [program.incentives]
//! credit_rate = 850.00
//! ```

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wcc_core::{ProgramConfig, ProgramConfigError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid program settings: {0}")]
    Invalid(#[from] ProgramConfigError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Sections printed by the text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportSection {
    Input,
    Summary,
    Credits,
    Incentives,
    Savings,
    Specifications,
}

impl ReportSection {
    pub const ALL: [Self; 6] = [
        Self::Input,
        Self::Summary,
        Self::Credits,
        Self::Incentives,
        Self::Savings,
        Self::Specifications,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub reports: Vec<ReportSection>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            reports: vec![
                ReportSection::Summary,
                ReportSection::Credits,
                ReportSection::Specifications,
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: Option<String>,
    pub output: OutputConfig,
    pub program: ProgramConfig,
}

impl CliConfig {
    /// Parses and validates configuration text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.program.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = CliConfig::from_toml("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.program.incentives.credit_rate, dec!(800.00));
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = CliConfig::from_toml(
            r#"
log_level = "debug"

[output]
format = "json"
reports = ["summary", "savings"]

[program.incentives]
credit_rate = 850.0
"#,
        )
        .unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(
            config.output.reports,
            vec![ReportSection::Summary, ReportSection::Savings]
        );
        assert_eq!(config.program.incentives.credit_rate, dec!(850));
        assert_eq!(config.program.incentives.verifier, dec!(100.00));
        assert_eq!(config.program.savings.fireplace_therms, 18.3);
    }

    #[test]
    fn negative_rate_is_rejected() {
        let err = CliConfig::from_toml(
            r#"
[program.incentives]
thermostat = -5.0
"#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn gas_points_cap_above_ceiling_is_rejected() {
        let err = CliConfig::from_toml(
            r#"
[program.incentives]
gas_points_cap = 10.0
"#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid(ProgramConfigError::InvalidGasPointsCap(cap)) if cap == 10.0
        ));
    }

    #[test]
    fn unknown_format_is_a_parse_error() {
        let err = CliConfig::from_toml("[output]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
