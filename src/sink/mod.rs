//! Output sink subsystem.
//!
//! # Data Flow
//! ```text
//! filtered + enriched LogRecords (caller's task)
//!     → Format (json.rs or human.rs) renders complete lines
//!     → writer.rs queues the bytes to the writer task
//!     → writer task writes to the underlying AsyncWrite
//! flush() → marker queued behind all prior writes → stream flushed → reply
//! ```
//!
//! # Design Decisions
//! - Formatting happens before queueing, so lines never interleave
//! - The stream is owned by exactly one task
//! - I/O errors are reported, never retried

pub mod human;
pub mod json;
pub mod memory;
pub mod writer;

use thiserror::Error;

use crate::logger::LogRecord;

pub use human::HumanFormat;
pub use json::JsonFormat;
pub use memory::MemoryWriter;
pub use writer::QueuedSink;

/// Renders one record as one complete line (trailing newline included).
pub trait Format: Send + Sync + std::fmt::Debug {
    fn format(&self, record: &LogRecord, buf: &mut Vec<u8>);
}

/// Errors reported by sink operations.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The writer task has been shut down.
    #[error("log sink is closed")]
    Closed,

    /// Writing to or flushing the underlying stream failed.
    #[error("log sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}
