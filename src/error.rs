//! Error types for the energy_forecast crate

use thiserror::Error;

/// Custom error types for the energy_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Historical source missing, empty, or unparsable
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// No trained model artifact exists in the configured directory
    #[error("No model artifact found: {0}")]
    ArtifactNotFound(String),

    /// An artifact exists but could not be deserialized
    #[error("Corrupt model artifact: {0}")]
    ArtifactCorrupt(String),

    /// The model rejected the rows it was asked to price
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::DataUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::ArtifactCorrupt(err.to_string())
    }
}
