//! Observability of the logging core itself.
//!
//! # Data Flow
//! ```text
//! context, logger and sink subsystems produce:
//!     → tracing events (scope entry, writer start/stop, I/O errors)
//!     → logging.rs subscriber → stderr
//! ```
//!
//! # Design Decisions
//! - Kept separate from the record pipeline: diagnostics never re-enter it

pub mod logging;

pub use logging::init_diagnostics;
