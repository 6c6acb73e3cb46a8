//! Error handling and error types for the housing pipeline.
//!
//! Every stage of the job returns [`Result`], and no stage recovers from a
//! failure: the binary propagates the first error to `main` and exits with
//! its diagnostic.

use std::io;
use thiserror::Error;

/// Main error type for the library.
///
/// This enum covers all error conditions that can occur during dataset
/// loading, transformation, training, evaluation and persistence.
#[derive(Error, Debug)]
pub enum HousingError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Data loading and parsing errors
    #[error("Data loading error: {message}")]
    DataLoading { message: String },

    /// A required column is absent from the CSV header
    #[error("Missing column in header: {column}")]
    MissingColumn { column: String },

    /// Dataset-related errors
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Training-related errors
    #[error("Training error: {message}")]
    Training { message: String },

    /// Prediction errors
    #[error("Prediction error: {message}")]
    Prediction { message: String },

    /// Model serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A pipeline stage was invoked out of order
    #[error("Invalid pipeline transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// CSV parsing errors
    #[error("CSV parsing error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Bincode serialization errors
    #[error("Bincode error: {source}")]
    Bincode {
        #[from]
        source: bincode::Error,
    },

    /// TOML configuration parsing errors
    #[error("TOML error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
}

/// Type alias for Results using HousingError
pub type Result<T> = std::result::Result<T, HousingError>;

impl HousingError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        HousingError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        HousingError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a data loading error
    pub fn data_loading<S: Into<String>>(message: S) -> Self {
        HousingError::DataLoading {
            message: message.into(),
        }
    }

    /// Create a missing column error
    pub fn missing_column<S: Into<String>>(column: S) -> Self {
        HousingError::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        HousingError::Dataset {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        HousingError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a training error
    pub fn training<S: Into<String>>(message: S) -> Self {
        HousingError::Training {
            message: message.into(),
        }
    }

    /// Create a prediction error
    pub fn prediction<S: Into<String>>(message: S) -> Self {
        HousingError::Prediction {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        HousingError::Serialization {
            message: message.into(),
        }
    }

    /// Create an invalid pipeline transition error
    pub fn invalid_transition<F, T>(from: F, to: T) -> Self
    where
        F: std::fmt::Display,
        T: std::fmt::Display,
    {
        HousingError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            HousingError::Config { .. } => "config",
            HousingError::InvalidParameter { .. } => "invalid_parameter",
            HousingError::DataLoading { .. } => "data_loading",
            HousingError::MissingColumn { .. } => "missing_column",
            HousingError::Dataset { .. } => "dataset",
            HousingError::DimensionMismatch { .. } => "dimension_mismatch",
            HousingError::Training { .. } => "training",
            HousingError::Prediction { .. } => "prediction",
            HousingError::Serialization { .. } => "serialization",
            HousingError::InvalidTransition { .. } => "invalid_transition",
            HousingError::IO { .. } => "io",
            HousingError::Csv { .. } => "csv",
            HousingError::Json { .. } => "json",
            HousingError::Bincode { .. } => "bincode",
            HousingError::Toml { .. } => "toml",
        }
    }
}
