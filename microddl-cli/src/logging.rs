//! Logging setup for the CLI.
//!
//! # Environment Variables
//!
//! - `MICRODDL_DEBUG=true|1|yes` - Enable debug logging
//! - `MICRODDL_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific log level
//! - `MICRODDL_LOG_FORMAT=pretty|compact|json` - Set the output format
//!
//! Environment variables win over `--verbose`, which wins over the `[debug]`
//! section of `microddl.toml`. Logs go to stderr; command output stays on
//! stdout.

use std::env;
use std::sync::Once;

use microddl_schema::config::{DebugConfig, LogFormat, LogLevel};

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `MICRODDL_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("MICRODDL_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

fn parse_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "trace" => Some(LogLevel::Trace),
        "debug" => Some(LogLevel::Debug),
        "info" => Some(LogLevel::Info),
        "warn" | "warning" => Some(LogLevel::Warn),
        "error" => Some(LogLevel::Error),
        _ => None,
    }
}

fn parse_format(format: &str) -> Option<LogFormat> {
    match format.to_lowercase().as_str() {
        "pretty" => Some(LogFormat::Pretty),
        "compact" => Some(LogFormat::Compact),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}

/// Resolve the effective log level.
pub fn log_level(config: &DebugConfig, verbose: bool) -> LogLevel {
    if let Some(level) = env::var("MICRODDL_LOG_LEVEL").ok().as_deref().and_then(parse_level) {
        return level;
    }
    if verbose || is_debug_enabled() {
        return LogLevel::Debug;
    }
    config.log_level
}

/// Resolve the effective log format.
pub fn log_format(config: &DebugConfig) -> LogFormat {
    env::var("MICRODDL_LOG_FORMAT")
        .ok()
        .as_deref()
        .and_then(parse_format)
        .unwrap_or(config.log_format)
}

/// Initialize logging. Subsequent calls are no-ops.
pub fn init(config: &DebugConfig, verbose: bool) {
    INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let level = log_level(config, verbose).as_str();
        let filter = EnvFilter::try_new(format!(
            "microddl={},microddl_schema={},microddl_cli={}",
            level, level, level
        ))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

        let format = log_format(config);
        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json().with_writer(std::io::stderr))
                    .init();
            }
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact().with_writer(std::io::stderr))
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty().with_writer(std::io::stderr))
                    .init();
            }
        }

        tracing::debug!(level, format = ?format, "MicroDDL logging initialized");
    });
}
