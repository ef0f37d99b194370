// src/config.rs

//! Launcher settings, read once from the environment.
//!
//! The command line belongs almost entirely to the child, so everything the
//! launcher itself can be told comes from environment variables:
//!
//! - `NEOVIDE_START_BUNDLE_ID`: identifier to resolve (default
//!   `com.neovide.neovide`).
//! - `NEOVIDE_START_LOG`: log level for the `tracing` subscriber.
//! - `NO_COLOR`: any value disables coloured diagnostics.

use std::str::FromStr;

use crate::types::DEFAULT_BUNDLE_ID;

pub const BUNDLE_ID_VAR: &str = "NEOVIDE_START_BUNDLE_ID";
pub const LOG_VAR: &str = "NEOVIDE_START_LOG";
pub const NO_COLOR_VAR: &str = "NO_COLOR";

/// Verbosity of the launcher's own logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" | "none" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!(
                "invalid log level: {other} (expected off, error, warn, info, debug or trace)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bundle_id: String,
    pub log_level: LogLevel,
    pub no_color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bundle_id: DEFAULT_BUNDLE_ID.to_string(),
            log_level: LogLevel::default(),
            no_color: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// An unparseable log level falls back to the default rather than
    /// failing the launch.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bundle_id = lookup(BUNDLE_ID_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BUNDLE_ID.to_string());

        let log_level = lookup(LOG_VAR)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Self {
            bundle_id,
            log_level,
            // Presence is what counts, even when empty.
            no_color: lookup(NO_COLOR_VAR).is_some(),
        }
    }
}
