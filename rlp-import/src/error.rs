//! Error types for the import utility

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// Error reading or writing a file
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input has a header row but no usable columns
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Input parsed but does not have the expected shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;
