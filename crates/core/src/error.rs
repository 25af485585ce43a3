//! Error types for the propagator toolkit

use thiserror::Error;

/// Main error type for propagator operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Column not found in table: {column}")]
    MissingColumn { column: String },

    #[error("Duplicate subcatchment id: {id}")]
    DuplicateId { id: String },

    #[error("Unknown subcatchment id: {id}")]
    UnknownSubcatchment { id: String },

    #[error("Cyclic structure detected after {passes} passes")]
    CyclicStructure { passes: usize },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for propagator operations
pub type Result<T> = std::result::Result<T, Error>;
