//! Demonstration driver for the contextual logging core.
//!
//! # Architecture Overview
//!
//! ```text
//!   call site ──▶ Logger ──▶ LevelFilter ──▶ transform ──▶ QueuedSink ──▶ stdout/stderr
//!                                               ▲               │
//!                                               │               └─ writer task (owns stream)
//!                             ambient context (task-local TagSet)
//!                                               ▲
//!                             with_transaction { trace.id = <fresh id> }
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use ambient_log::config::{load_config, LogConfig, OutputFormat};
use ambient_log::logger::{Level, Logger};
use ambient_log::observability::init_diagnostics;
use ambient_log::scenarios::{self, ScenarioError};

#[derive(Parser)]
#[command(name = "ambient-log")]
#[command(about = "Run contextual structured-logging demonstrations", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum severity, overriding the configuration file.
    #[arg(short, long)]
    level: Option<Level>,

    /// Output format, overriding the configuration file.
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Human,
}

#[derive(Subcommand)]
enum Commands {
    /// Concurrent tasks, each in its own transaction
    Transactions {
        /// Task names (defaults to the configured list)
        names: Vec<String>,
    },
    /// Nested transactions shadowing each other
    Nested,
    /// One record per level, no ambient context
    Plain,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LogConfig::default(),
    };
    if let Some(level) = cli.level {
        config.logging.level = level.to_string();
    }
    if let Some(format) = cli.format {
        config.logging.format = match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Human => OutputFormat::Human,
        };
    }

    init_diagnostics(&config.diagnostics)?;
    let logger = Logger::from_config(&config.logging)?;

    let outcome = match cli.command {
        Commands::Transactions { names } => {
            let names = if names.is_empty() { config.demo.tasks.clone() } else { names };
            scenarios::transactions::run(&logger, &names, config.demo.max_delay_ms).await
        }
        Commands::Nested => scenarios::nested::run(&logger).await.map_err(ScenarioError::from),
        Commands::Plain => scenarios::run_plain(&logger).map_err(ScenarioError::from),
    };

    // Records queued before a failure still reach the stream.
    logger.shutdown().await?;
    outcome?;
    Ok(())
}
