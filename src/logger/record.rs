//! Log records.

use chrono::{DateTime, Utc};

use crate::context::TagSet;
use crate::logger::level::Level;

/// One log event as created at the call site.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub tags: TagSet,
}

impl LogRecord {
    /// Create a record stamped with the current UTC time.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            tags: TagSet::new(),
        }
    }

    /// Attach call-site tags.
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    /// Override the timestamp.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
