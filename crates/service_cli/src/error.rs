//! CLI error types.

use payoff_engine::config::ConfigError;
use payoff_engine::EngineError;
use thiserror::Error;

/// Errors surfaced by the `payoff` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// A command argument was rejected
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Engine construction or sampling failed
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// JSON output failed
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output failed
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    /// Writing to stdout failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
