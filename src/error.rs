//! Error types for the prediction pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, preparing, training or forecasting
#[derive(Error, Debug)]
pub enum Error {
    #[error("No data file found at the specified path: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Required column '{0}' is missing")]
    MissingColumn(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("No finite values to compute a mean from")]
    NoFiniteValues,

    #[error("Metric error: {0}")]
    Metric(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
