//! Error types for the ecowatt crate

use forecast_math::MathError;
use thiserror::Error;

/// Custom error types for the ecowatt crate
#[derive(Debug, Error)]
pub enum EcoWattError {
    /// Malformed period count, lag size, horizon or other parameter
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Series too short for the requested operation
    #[error("Insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Ill-conditioned or non-finite training input
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Training or forecasting requested before any series was loaded
    #[error("No series loaded in this session")]
    MissingSeries,

    /// Error related to tabular data contents
    #[error("Data error: {0}")]
    Data(String),

    /// Error parsing a date, time or number at the ingestion boundary
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the CSV reader/writer
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error (de)serializing a stored model
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error from the numeric kernels
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error extracting configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, EcoWattError>;

impl From<figment::Error> for EcoWattError {
    fn from(err: figment::Error) -> Self {
        EcoWattError::Config(err.to_string())
    }
}
