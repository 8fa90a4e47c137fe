//! Tracing setup for roomchat.
//!
//! `RUST_LOG` wins when it is set. Otherwise the configured level applies to
//! roomchat itself and sqlx query logging is held back to warnings.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{ChatError, Result};

/// Targets that are logged at a fixed level regardless of the configured one.
const QUIET_TARGETS: &[(&str, LevelFilter)] = &[("sqlx", LevelFilter::WARN)];

/// Unknown names fall back to `info`.
fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "warning" => LevelFilter::WARN,
        other => other.parse().unwrap_or(LevelFilter::INFO),
    }
}

fn default_directives(level: LevelFilter) -> String {
    let mut directives = level.to_string().to_ascii_lowercase();
    for (target, target_level) in QUIET_TARGETS {
        directives.push_str(&format!(
            ",{target}={}",
            target_level.to_string().to_ascii_lowercase()
        ));
    }
    directives
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(default_directives(parse_level(level)))
        .map_err(|e| ChatError::Config(format!("invalid log filter: {e}")))
}

/// Open the log file for appending, creating missing directories.
///
/// An empty path means no file logging.
fn open_log_file(path: &str) -> Result<Option<File>> {
    if path.trim().is_empty() {
        return Ok(None);
    }
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Some(file))
}

/// Initialize logging to stdout and, when configured, the log file.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level)?;

    match open_log_file(&config.file)? {
        Some(file) => {
            let writer = std::io::stdout.and(Arc::new(file));
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true),
                )
                .with(filter)
                .init();
        }
        None => init_stdout(filter),
    }

    Ok(())
}

/// Initialize console-only logging.
pub fn init_console_only(level: &str) {
    let filter = build_filter(level).unwrap_or_else(|_| EnvFilter::new("info"));
    init_stdout(filter);
}

fn init_stdout(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(filter)
        .init();
}
