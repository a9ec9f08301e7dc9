// src/error.rs

use thiserror::Error;

/// Errors raised while loading and analysing a trial log.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input log does not exist. This is the only error translated for the user.
    #[error("{0} not found")]
    InputNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: column '{column}' has non-numeric value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("trial log contains no data rows")]
    EmptyTrial,
}
