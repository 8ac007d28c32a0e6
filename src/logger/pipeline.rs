//! Level filtering and ambient-tag enrichment.
//!
//! # Responsibilities
//! - Drop records below the configured threshold before any other work
//! - Merge the caller's ambient tags under each record's own tags
//!
//! # Design Decisions
//! - Threshold lives in an atomic so the logger handle stays `Sync`
//! - Transform never touches level, timestamp or message

use std::sync::atomic::{AtomicU8, Ordering};

use crate::context::current_tags;
use crate::logger::level::Level;
use crate::logger::record::LogRecord;

/// Severity threshold. Records strictly below it are discarded.
#[derive(Debug)]
pub struct LevelFilter {
    threshold: AtomicU8,
}

impl LevelFilter {
    pub fn new(threshold: Level) -> Self {
        Self {
            threshold: AtomicU8::new(threshold as u8),
        }
    }

    pub fn threshold(&self) -> Level {
        Level::from(self.threshold.load(Ordering::Relaxed))
    }

    pub fn set_threshold(&self, level: Level) {
        self.threshold.store(level as u8, Ordering::Relaxed);
    }

    /// True if a record at `level` passes the filter.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.threshold()
    }
}

/// Base the record's tags on the ambient tags of the calling task.
///
/// Always merges, so duplicate call-site keys collapse even outside a scope.
pub fn transform(mut record: LogRecord) -> LogRecord {
    record.tags = current_tags().merged_with(&record.tags);
    record
}

/// Filter then transform a batch, preserving call order.
pub fn process(filter: &LevelFilter, batch: impl IntoIterator<Item = LogRecord>) -> Vec<LogRecord> {
    batch
        .into_iter()
        .filter(|record| filter.enabled(record.level))
        .map(transform)
        .collect()
}
