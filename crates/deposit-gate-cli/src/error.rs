//! CLI error types

use deposit_gate::{ConfigError, GateError, StorageError};
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// The gate rejected the operation
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Genesis file could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// State file could not be read or written
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A mutating command was run without an acting account
    #[error("No caller given: pass --caller or set GATE_CALLER")]
    MissingCaller,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
