//! Logging core.
//!
//! # Data Flow
//! ```text
//! Logger::log(level, message, tags)
//!     → pipeline.rs LevelFilter (drop below threshold)
//!     → pipeline.rs transform (ambient tags as base, call-site tags win)
//!     → sink (format + queue)
//! ```

pub mod handle;
pub mod level;
pub mod pipeline;
pub mod record;

pub use handle::Logger;
pub use level::{Level, ParseLevelError};
pub use pipeline::{transform, LevelFilter};
pub use record::LogRecord;
