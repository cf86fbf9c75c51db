//! Logging system.
//!
//! Structured logging via the `tracing` crate. Output always goes to stderr;
//! stdout is reserved for command output. The `CODECLIP_LOG` environment
//! variable overrides the configured level with a full EnvFilter directive.

use crate::error::CaptureError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Master switch; `--quiet` turns this off
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_enabled() -> bool {
    true
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            level: default_level(),
            format: default_format(),
        }
    }
}

/// Initialize the global tracing subscriber.
pub fn init_logging(config: &LoggingConfig) -> Result<(), CaptureError> {
    if !config.enabled {
        return Ok(());
    }

    let directive = std::env::var("CODECLIP_LOG").unwrap_or_else(|_| config.level.clone());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| CaptureError::ConfigError(format!("Invalid log filter '{}': {}", directive, e)))?;

    let result = match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        "text" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        other => {
            return Err(CaptureError::ConfigError(format!(
                "Invalid log format '{}'. Must be 'text' or 'json'.",
                other
            )))
        }
    };

    result.map_err(|e| CaptureError::ConfigError(format!("Failed to initialize logging: {}", e)))
}
