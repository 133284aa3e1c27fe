// src/error.rs
// =============================================================================
// Error types for the library.
//
// Only whole-run failures live here: reading the catalog, writing the
// report, loading the config and building the HTTP client. Problems with
// a single row or a single link never become a CheckerError. Bad rows
// are skipped by the parser and bad links become FailureRecords.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a run
#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("Failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write report to {}: {source}", path.display())]
    WriteReport {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No input file given and no README.md found next to the working directory")]
    MissingInput,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Errors from loading or validating the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, CheckerError>;
