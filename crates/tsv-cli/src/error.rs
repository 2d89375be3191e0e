//! Error types for the tsv CLI

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the CLI Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a command
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read an input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The core parser rejected the input
    #[error("failed to parse TSV '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: tsv_core::Error,
    },

    /// No column with the given name in the header row
    #[error("column '{name}' not found in row {row}")]
    ColumnNotFound { name: String, row: usize },

    /// Cell coordinates outside the table
    #[error("no cell at row {row}, column {col}")]
    CellOutOfRange { row: usize, col: usize },

    /// Export format other than csv or json
    #[error("unknown format '{0}', supported formats: csv, json")]
    UnknownFormat(String),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
