//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject unknown level names instead of substituting a default
//! - Check the diagnostics filter directive parses
//! - Check demo task names are non-empty and distinct
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LogConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::LogConfig;
use crate::logger::ParseLevelError;

/// A single semantic problem in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("logging.level: {0}")]
    UnknownLevel(#[from] ParseLevelError),

    #[error("diagnostics.filter '{filter}' is invalid: {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("demo.tasks[{0}] is empty")]
    EmptyTaskName(usize),

    #[error("demo.tasks contains '{0}' more than once")]
    DuplicateTaskName(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &LogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.logging.threshold() {
        errors.push(ValidationError::UnknownLevel(e));
    }

    if let Err(e) = EnvFilter::try_new(&config.diagnostics.filter) {
        errors.push(ValidationError::InvalidFilter {
            filter: config.diagnostics.filter.clone(),
            reason: e.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (i, name) in config.demo.tasks.iter().enumerate() {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyTaskName(i));
        } else if !seen.insert(name.as_str()) {
            errors.push(ValidationError::DuplicateTaskName(name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
