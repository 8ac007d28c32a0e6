//! Contextual structured logging.
//!
//! Log calls made inside [`context::with_transaction`] carry a `trace.id`
//! tag automatically, even when many transactions interleave on the same
//! runtime. Records are filtered by severity, enriched with the ambient
//! tags of the calling task, and written as newline-delimited JSON (or a
//! human-readable line) by a single writer task.

pub mod config;
pub mod context;
pub mod logger;
pub mod observability;
pub mod scenarios;
pub mod sink;

pub use config::LogConfig;
pub use context::{with_tags, with_transaction, TagSet};
pub use logger::{Level, LogRecord, Logger};
