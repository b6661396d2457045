use std::path::PathBuf;
use thiserror::Error;

use canopy_query::QueryError;

/// Application error types for the Canopy CLI
#[derive(Error, Debug)]
pub enum AppError {
    /// Error reading the data file
    #[error("Failed to read data file {path}: {source}")]
    ReadData {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing the data file as JSON
    #[error("Failed to parse data file {path}: {source}")]
    ParseData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Error when the data file is neither a record array nor an envelope
    #[error("Data file {path} must contain a JSON array of records or a listing envelope")]
    UnsupportedShape { path: PathBuf },

    /// Error from the query engine or the listing mapper
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Error when a requested project was not found
    #[error("Project '{id}' not found")]
    NotFound { id: String },
}

/// Result type alias for CLI operations
pub type AppResult<T> = Result<T, AppError>;
