//! Shared utilities for integration testing.

use ambient_log::logger::{Level, Logger};
use ambient_log::sink::{JsonFormat, MemoryWriter, QueuedSink};
use serde_json::Value;

/// A JSON logger writing into memory.
pub fn capture_logger(level: Level) -> (Logger, MemoryWriter) {
    let out = MemoryWriter::new();
    let logger = Logger::new(level, QueuedSink::spawn(out.clone(), JsonFormat));
    (logger, out)
}

/// Parse every captured line as a JSON object.
pub fn parse_lines(out: &MemoryWriter) -> Vec<Value> {
    out.lines()
        .iter()
        .map(|line| serde_json::from_str(line).unwrap_or_else(|e| panic!("invalid JSON line {:?}: {}", line, e)))
        .collect()
}

/// The `trace.id` of a parsed record, if any.
#[allow(dead_code)]
pub fn trace_id(record: &Value) -> Option<&str> {
    record.get("trace.id").and_then(Value::as_str)
}

/// The `message` of a parsed record.
#[allow(dead_code)]
pub fn message(record: &Value) -> &str {
    record["message"].as_str().unwrap_or_default()
}
