//! Demonstration scenarios driven by the binary and the integration tests.
//!
//! # Scenarios
//! - `transactions`: sibling tasks, each in its own transaction, logging
//!   staged progress after random delays
//! - `nested`: an inner transaction shadowing an outer one
//! - `plain`: one record per level, no ambient context

pub mod nested;
pub mod transactions;

use thiserror::Error;

use crate::context::TagSet;
use crate::logger::{Level, Logger};
use crate::sink::SinkError;

/// Errors raised while running a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("scenario task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Emit one record per level, outside any transaction.
pub fn run_plain(logger: &Logger) -> Result<(), SinkError> {
    for level in [Level::Trace, Level::Debug, Level::Info, Level::Warning, Level::Error, Level::Critical] {
        logger.log(level, format!("{} message", level), TagSet::single("scenario", "plain"))?;
    }
    Ok(())
}
