//! Severity levels.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Ordered severity. `Unset` sorts below every real level.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    #[default]
    Unset = 0,
    Trace = 1,
    Debug = 2,
    Info = 3,
    Warning = 4,
    Error = 5,
    Critical = 6,
}

impl Level {
    /// Name used in structured output, `None` for `Unset`.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Level::Unset => None,
            Level::Trace => Some("Trace"),
            Level::Debug => Some("Debug"),
            Level::Info => Some("Info"),
            Level::Warning => Some("Warning"),
            Level::Error => Some("Error"),
            Level::Critical => Some("Critical"),
        }
    }
}

impl From<u8> for Level {
    fn from(val: u8) -> Self {
        match val {
            1 => Level::Trace,
            2 => Level::Debug,
            3 => Level::Info,
            4 => Level::Warning,
            5 => Level::Error,
            6 => Level::Critical,
            _ => Level::Unset,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("Unset"))
    }
}

/// A level name that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level '{0}' (expected unset, trace, debug, info, warning, error or critical)")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unset" => Ok(Level::Unset),
            "trace" | "verbose" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" | "fatal" => Ok(Level::Critical),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
