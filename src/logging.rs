// src/logging.rs

//! Logging setup for `neovide-start` using `tracing` + `tracing-subscriber`.
//!
//! The level comes from `NEOVIDE_START_LOG` (see [`crate::config`]) and
//! defaults to `warn`, which keeps a normal launch silent apart from
//! diagnostics. Logs go to STDERR; the child inherits our stdout.

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;

use crate::config::LogLevel;

/// Initialise the global logging subscriber.
///
/// Call once at startup.
pub fn init_logging(level: LogLevel) -> Result<()> {
    fmt()
        .with_max_level(level_filter(level))
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("initialising logging: {e}"))?;

    Ok(())
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}
