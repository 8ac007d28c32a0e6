//! The logger handle threaded through call sites.
//!
//! # Responsibilities
//! - Own the level filter and the sink for one process
//! - Run each call through filter → transform → sink
//! - Expose flush and shutdown for orderly process exit
//!
//! # Design Decisions
//! - Explicit, cloneable handle created at startup; no hidden global
//! - Filtering happens before a record is built when possible
//! - Call-site failures (closed sink) are returned, not swallowed

use std::sync::Arc;

use tokio::io::AsyncWrite;

use crate::config::{ConfigError, LoggingConfig, OutputFormat, OutputTarget, ValidationError};
use crate::context::TagSet;
use crate::logger::level::Level;
use crate::logger::pipeline::{self, LevelFilter};
use crate::logger::record::LogRecord;
use crate::sink::{HumanFormat, JsonFormat, QueuedSink, SinkError};

struct Inner {
    filter: LevelFilter,
    sink: QueuedSink,
}

/// Cheaply cloneable logging handle.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// Create a logger over an already running sink.
    pub fn new(threshold: Level, sink: QueuedSink) -> Self {
        Self {
            inner: Arc::new(Inner {
                filter: LevelFilter::new(threshold),
                sink,
            }),
        }
    }

    /// Build a logger writing to stdout or stderr as configured.
    ///
    /// Must be called within a Tokio runtime. An unknown level name is an
    /// error; no default is substituted.
    pub fn from_config(config: &LoggingConfig) -> Result<Self, ConfigError> {
        let threshold = config.threshold().map_err(ValidationError::from)?;

        let writer: Box<dyn AsyncWrite + Unpin + Send> = match config.output {
            OutputTarget::Stdout => Box::new(tokio::io::stdout()),
            OutputTarget::Stderr => Box::new(tokio::io::stderr()),
        };
        let sink = match config.format {
            OutputFormat::Json => QueuedSink::spawn(writer, JsonFormat),
            OutputFormat::Human => QueuedSink::spawn(writer, HumanFormat),
        };

        tracing::info!(
            level = %threshold,
            format = ?config.format,
            output = ?config.output,
            "Logger initialized"
        );

        Ok(Self::new(threshold, sink))
    }

    pub fn level(&self) -> Level {
        self.inner.filter.threshold()
    }

    /// Change the threshold. Intended for startup; there is no reload protocol.
    pub fn set_level(&self, level: Level) {
        self.inner.filter.set_threshold(level);
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.inner.filter.enabled(level)
    }

    /// Filter, enrich and queue a single record.
    pub fn emit(&self, record: LogRecord) -> Result<(), SinkError> {
        self.emit_batch(std::iter::once(record))
    }

    /// Filter, enrich and queue records as one contiguous block.
    pub fn emit_batch(&self, records: impl IntoIterator<Item = LogRecord>) -> Result<(), SinkError> {
        let batch = pipeline::process(&self.inner.filter, records);
        self.inner.sink.write(&batch)
    }

    /// Log `message` at `level` with call-site `tags`.
    pub fn log(&self, level: Level, message: impl Into<String>, tags: TagSet) -> Result<(), SinkError> {
        if !self.enabled(level) {
            return Ok(());
        }
        self.emit(LogRecord::new(level, message).with_tags(tags))
    }

    pub fn trace(&self, message: impl Into<String>) -> Result<(), SinkError> {
        self.log(Level::Trace, message, TagSet::new())
    }

    pub fn debug(&self, message: impl Into<String>) -> Result<(), SinkError> {
        self.log(Level::Debug, message, TagSet::new())
    }

    pub fn info(&self, message: impl Into<String>) -> Result<(), SinkError> {
        self.log(Level::Info, message, TagSet::new())
    }

    pub fn warning(&self, message: impl Into<String>) -> Result<(), SinkError> {
        self.log(Level::Warning, message, TagSet::new())
    }

    pub fn error(&self, message: impl Into<String>) -> Result<(), SinkError> {
        self.log(Level::Error, message, TagSet::new())
    }

    pub fn critical(&self, message: impl Into<String>) -> Result<(), SinkError> {
        self.log(Level::Critical, message, TagSet::new())
    }

    /// Wait until everything logged so far, by any task, has been written.
    ///
    /// Call before the process exits or buffered records may be lost.
    pub async fn flush(&self) -> Result<(), SinkError> {
        self.inner.sink.flush().await
    }

    /// Flush and stop the sink. Later log calls fail with [`SinkError::Closed`].
    pub async fn shutdown(&self) -> Result<(), SinkError> {
        let result = self.inner.sink.close().await;
        tracing::debug!(ok = result.is_ok(), "Logger shut down");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{with_transaction, TRACE_ID_KEY};
    use crate::sink::MemoryWriter;

    fn capture(level: Level) -> (Logger, MemoryWriter) {
        let out = MemoryWriter::new();
        let logger = Logger::new(level, QueuedSink::spawn(out.clone(), JsonFormat));
        (logger, out)
    }

    #[tokio::test]
    async fn test_threshold_applies() {
        let (logger, out) = capture(Level::Info);
        logger.debug("hidden").unwrap();
        logger.info("shown").unwrap();
        logger.error("also shown").unwrap();
        logger.flush().await.unwrap();

        let lines = out.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| !l.contains("hidden")));
    }

    #[tokio::test]
    async fn test_set_level() {
        let (logger, out) = capture(Level::Error);
        logger.info("before").unwrap();
        logger.set_level(Level::Debug);
        assert_eq!(logger.level(), Level::Debug);
        logger.info("after").unwrap();
        logger.flush().await.unwrap();

        let lines = out.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("after"));
    }

    #[tokio::test]
    async fn test_ambient_tags_are_attached() {
        let (logger, out) = capture(Level::Debug);
        let id = with_transaction(async {
            logger.debug("inside").unwrap();
            crate::context::current_trace_id().unwrap()
        })
        .await;
        logger.debug("outside").unwrap();
        logger.flush().await.unwrap();

        let lines = out.lines();
        let inside: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        let outside: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(inside[TRACE_ID_KEY], id.as_str());
        assert!(outside.get(TRACE_ID_KEY).is_none());
    }

    #[tokio::test]
    async fn test_duplicate_call_site_keys_written_once() {
        let (logger, out) = capture(Level::Debug);
        logger
            .log(Level::Info, "outside", TagSet::new().with("k", "1").with("k", "2"))
            .unwrap();
        logger.flush().await.unwrap();

        let lines = out.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].matches("\"k\"").count(), 1);
        assert!(lines[0].ends_with(",\"k\":\"2\"}"), "{}", lines[0]);
    }

    #[tokio::test]
    async fn test_shutdown_closes() {
        let (logger, out) = capture(Level::Debug);
        logger.info("last words").unwrap();
        logger.shutdown().await.unwrap();

        assert_eq!(out.lines().len(), 1);
        assert!(matches!(logger.info("too late"), Err(SinkError::Closed)));
    }

    #[tokio::test]
    async fn test_from_config_rejects_unknown_level() {
        let config = LoggingConfig {
            level: "shouty".into(),
            ..LoggingConfig::default()
        };
        assert!(matches!(Logger::from_config(&config), Err(ConfigError::Validation(_))));
    }
}
