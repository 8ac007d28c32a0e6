//! Diagnostic output of the crate itself.
//!
//! # Responsibilities
//! - Install a `tracing` subscriber for internal events (sink lifecycle,
//!   I/O failures, scope entry at trace level)
//!
//! # Design Decisions
//! - Diagnostics go to stderr so they never mix with records on stdout
//! - `RUST_LOG` overrides the configured directive

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::DiagnosticsConfig;

/// Install the global diagnostics subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_diagnostics(config: &DiagnosticsConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
}
