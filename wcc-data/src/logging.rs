use std::{fs::File, io, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter,
    fmt::time::ChronoLocal,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Timestamp format for log file lines.
const FILE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

/// `RUST_LOG` wins, then the configured directive, then `info`.
fn make_filter(configured: Option<&str>) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    match configured {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level '{directive}'")),
        None => Ok(EnvFilter::new("info")),
    }
}

/// Initialise the tracing subscriber. Call once at startup.
///
/// * Console output goes to stderr without timestamps or targets so that
///   stdout stays clean for JSON.
/// * When `log_file` is given, every record is also appended there with a
///   local timestamp and source location.
pub fn init_tracing(
    configured_level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(configured_level)?;

    let console_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_writer(io::stderr);

    let file_layer = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_timer(ChronoLocal::new(FILE_TIME_FORMAT.to_string()))
                    .with_target(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_directive_must_parse() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(make_filter(Some("debug")).is_ok());
        assert!(make_filter(Some("wcc_data=notalevel")).is_err());
    }
}
