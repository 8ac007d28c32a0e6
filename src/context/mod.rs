//! Correlation context subsystem.
//!
//! # Data Flow
//! ```text
//! with_transaction(body)
//!     → trace_id.rs (fresh 128-bit id, hex rendered)
//!     → ambient.rs  (merge {"trace.id": id} over the task's current tags)
//!         → tags.rs (last-writer-wins merge)
//!     → body runs; every log call inside reads ambient::current_tags()
//!     → scope exit restores the parent context
//! ```
//!
//! # Design Decisions
//! - Context is per logical task, never per OS thread
//! - Call-site tags override ambient tags; inner scopes override outer ones

pub mod ambient;
pub mod tags;
pub mod trace_id;
pub mod transaction;

pub use ambient::{current_tags, inherit, spawn_inherited, with_tags, with_tags_sync, AmbientContext};
pub use tags::{merge, Tag, TagSet};
pub use trace_id::TraceId;
pub use transaction::{current_trace_id, with_transaction, with_transaction_sync, TRACE_ID_KEY};
