//! Report log setup
//!
//! All library logging goes through the `log` facade. The binary routes it
//! into an append-only report file; env_logger formats each record into a
//! buffer and writes it under a lock, so concurrent workers never interleave
//! inside a line.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;

/// Install the global logger.
///
/// With `log_file` set, records are appended to that file; otherwise they go
/// to stderr. `RUST_LOG` overrides the default `info` filter.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder
        .filter_module("chromiumoxide::handler", log::LevelFilter::Off)
        .filter_module("chromiumoxide::conn", log::LevelFilter::Off)
        .format_timestamp_secs();

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Logger already initialized")?;
    Ok(())
}
