use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{info, warn};
use wcc_core::CodeCreditCalculator;
use wcc_data::{
    CliConfig, OutputDocument, OutputFormat, ReportSection, load_from_str, logging, output,
};

/// Calculate Washington Code Credit incentives for a batch of homes.
///
/// The CSV file has one home per row. The header row holds checklist
/// question ids, with or without the `wcc-` prefix.
#[derive(Parser, Debug)]
#[command(name = "wcc-calculator")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file of checklists
    #[arg(short, long)]
    file: PathBuf,

    /// TOML file with program rates and output settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Text report sections, comma separated (overrides the config file)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    report: Vec<ReportSection>,

    /// Also append timestamped log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the normalized inputs as JSON instead of calculating
    #[arg(long, default_value_t = false)]
    dump_input: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CliConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => CliConfig::default(),
    };
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if !args.report.is_empty() {
        config.output.reports = args.report.clone();
    }

    logging::init_tracing(config.log_level.as_deref(), args.log_file.as_deref())?;

    let calculator = CodeCreditCalculator::new(config.program.clone())
        .context("Invalid program settings")?;

    info!("Loading checklists from: {}", args.file.display());

    let contents = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;
    let inputs = load_from_str(&contents)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    info!("Parsed {} homes from CSV", inputs.len());

    if args.dump_input {
        for input in &inputs {
            println!("{}", output::dump_input(input)?);
        }
        return Ok(());
    }

    let calculations: Vec<_> = inputs
        .iter()
        .map(|input| calculator.calculate(input))
        .collect();

    for (idx, calculation) in calculations.iter().enumerate() {
        for warning in calculation.warnings() {
            warn!(row = idx + 1, "{warning}");
        }
    }

    match config.output.format {
        OutputFormat::Json => {
            let documents: Vec<_> = calculations
                .iter()
                .enumerate()
                .map(|(idx, calculation)| OutputDocument::new(idx + 1, calculation))
                .collect();
            println!("{}", output::to_json(&documents)?);
        }
        OutputFormat::Text => {
            for (idx, calculation) in calculations.iter().enumerate() {
                println!("=== Home {} ===\n", idx + 1);
                println!("{}", output::render_text(calculation, &config.output.reports));
            }
        }
    }

    let total_incentives: Decimal = calculations
        .iter()
        .map(|calculation| calculation.summary.total_builder_incentive)
        .sum();
    info!(
        "Calculated {} homes, ${:.2} in builder incentives.",
        calculations.len(),
        total_incentives
    );

    Ok(())
}
