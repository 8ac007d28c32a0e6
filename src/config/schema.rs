//! Configuration schema definitions.
//!
//! All sections derive Serde traits for deserialization from TOML and fall
//! back to defaults for anything omitted.

use serde::{Deserialize, Serialize};

use crate::logger::{Level, ParseLevelError};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Threshold and output of application log records.
    pub logging: LoggingConfig,

    /// The crate's own diagnostic output.
    pub diagnostics: DiagnosticsConfig,

    /// Demonstration driver settings.
    pub demo: DemoConfig,
}

/// Record output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Newline-delimited JSON.
    #[default]
    Json,
    /// Single-line text for terminals.
    Human,
}

/// Stream the sink writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum severity (unset, trace, debug, info, warning, error, critical).
    pub level: String,

    /// Output format.
    pub format: OutputFormat,

    /// Output stream.
    pub output: OutputTarget,
}

impl LoggingConfig {
    /// Parse the configured threshold.
    pub fn threshold(&self) -> Result<Level, ParseLevelError> {
        self.level.parse()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            format: OutputFormat::Json,
            output: OutputTarget::Stdout,
        }
    }
}

/// Diagnostics configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub filter: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            filter: "ambient_log=info".to_string(),
        }
    }
}

/// Demonstration driver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Names of the concurrent tasks in the transactions scenario.
    pub tasks: Vec<String>,

    /// Upper bound of the random delay between stages, in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tasks: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            max_delay_ms: 250,
        }
    }
}
