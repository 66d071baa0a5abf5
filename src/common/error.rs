//! Error types for the QA tools
//!
//! Error messages are written for CI logs: they name the file or
//! executable involved and, where possible, what was searched.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the QA tools
#[derive(Error, Debug)]
pub enum Error {
    // === Log File Errors ===
    #[error("Failed to read log file '{path}': {error}")]
    LogRead { path: String, error: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === Harness Errors ===
    #[error("Test driver '{name}' not found. Searched: {searched}")]
    DriverNotFound { name: String, searched: String },

    #[error("Test driver failed to start: {0}")]
    DriverStartFailed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Test run timed out after {0} seconds")]
    RunTimeout(u64),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a log read error for a path
    pub fn log_read(path: &Path, error: io::Error) -> Self {
        Self::LogRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a driver not found error with search locations
    pub fn driver_not_found<S: AsRef<str>>(name: &str, searched: &[S]) -> Self {
        Self::DriverNotFound {
            name: name.to_string(),
            searched: searched
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
