//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LogConfig (validated, immutable)
//!     → Logger::from_config at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once at process start; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{DemoConfig, DiagnosticsConfig, LogConfig, LoggingConfig, OutputFormat, OutputTarget};
pub use validation::{validate_config, ValidationError};
