//! Error types and utilities for the VNL infographic

use thiserror::Error;

/// Result type alias for infographic operations
pub type Result<T> = std::result::Result<T, VnlError>;

/// Main error type for infographic operations
#[derive(Error, Debug)]
pub enum VnlError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
        /// Underlying cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input table errors (missing columns, unparsable cells)
    #[error("Data error: {message}")]
    Data {
        /// What went wrong
        message: String,
        /// 1-based CSV line, when known
        row: Option<u64>,
        /// Underlying cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Chart drawing and image encoding errors
    #[error("Graph error: {message}")]
    Graph {
        /// What went wrong
        message: String,
        /// Underlying cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid parameters handed to an aggregator or renderer
    #[error("Validation error: {message}")]
    Validation {
        /// What went wrong
        message: String,
        /// Offending parameter
        field: Option<String>,
    },
}

impl VnlError {
    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new data error
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data {
            message: msg.into(),
            row: None,
            source: None,
        }
    }

    /// Create a new data error tied to a CSV row
    pub fn data_at_row(
        msg: impl Into<String>,
        row: u64,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Data {
            message: msg.into(),
            row: Some(row),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

// Error conversion implementations for external types

/// Convert from csv::Error to VnlError, keeping the offending row when known
impl From<csv::Error> for VnlError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(csv::Position::line);
        if let Some(line) = line {
            return Self::data_at_row(format!("CSV parsing failed at line {line}"), line, err);
        }

        if err.is_io_error() {
            if let csv::ErrorKind::Io(io) = err.into_kind() {
                return Self::Io(io);
            }
            return Self::data("CSV input could not be read");
        }

        Self::Data {
            message: "CSV parsing failed".to_string(),
            row: None,
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to VnlError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for VnlError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from image encoding errors to VnlError
impl From<image::ImageError> for VnlError {
    fn from(err: image::ImageError) -> Self {
        Self::graph_with_source("Image encoding failed", err)
    }
}
