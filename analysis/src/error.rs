//! Error types for the catalogue insights pipeline.
//!
//! Each stage owns its error type:
//!
//! - [`InputError`] - catalogue file reading and CSV structure
//! - [`DataFormatError`] - a row value that cannot be interpreted
//! - [`ValidationError`] - chart inputs and summary schema checks
//! - [`InsufficientDataError`] - not enough data to summarise
//! - [`WriteError`] - artifact output
//! - [`ConfigError`] - pipeline options file
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across stage boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Input Errors
// =============================================================================

/// Errors while reading the catalogue file.
#[derive(Debug, Error)]
pub enum InputError {
    /// Failed to read file.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Empty file.
    #[error("Catalogue file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in catalogue")]
    NoHeaders,

    /// A required column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A record could not be parsed.
    #[error("Malformed record at line {line}: {message}")]
    Malformed { line: u64, message: String },
}

// =============================================================================
// Data Format Errors
// =============================================================================

/// A row value that cannot be interpreted, with enough context to find it.
#[derive(Debug, Clone, Error)]
#[error("Row {row}, field '{field}' (value '{value}'): {message}")]
pub struct DataFormatError {
    /// Zero-based index of the row in the loaded catalogue.
    pub row: usize,
    pub field: String,
    pub value: String,
    pub message: String,
}

impl DataFormatError {
    pub fn new(row: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.into(),
            value: String::new(),
            message: message.into(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised before rendering a chart or writing a summary.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Bar chart with no data.
    #[error("Series data is required for '{title}'")]
    EmptySeries { title: String },

    /// Line chart with fewer than two points.
    #[error("Line charts require at least {required} data points, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    /// A data point value that cannot be plotted.
    #[error("Invalid value {value} for point '{label}'")]
    InvalidValue { label: String, value: f64 },

    /// Chart canvas options leave no room to plot.
    #[error("Invalid chart options: {0}")]
    InvalidOptions(String),

    /// Summary document does not match the embedded schema.
    #[error("Summary failed schema validation: {errors:?}")]
    SchemaError { errors: Vec<String> },
}

// =============================================================================
// Insufficient Data Errors
// =============================================================================

/// The catalogue does not carry enough data to build a summary.
#[derive(Debug, Error)]
pub enum InsufficientDataError {
    /// No rows at all.
    #[error("Cannot summarise an empty catalogue")]
    NoRows,

    /// An aggregate table required by the summary is empty.
    #[error("No {0} found in catalogue")]
    EmptyTable(&'static str),
}

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while writing artifacts.
#[derive(Debug, Error)]
pub enum WriteError {
    /// IO error.
    #[error("Failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors while loading pipeline options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("Failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid JSON or unknown values.
    #[error("Invalid config: {0}")]
    Invalid(#[from] serde_json::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by [`crate::transform::pipeline::analyse_catalogue`].
/// It wraps all stage errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Catalogue reading error.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Row interpretation error.
    #[error("Data format error: {0}")]
    DataFormat(#[from] DataFormatError),

    /// Chart or schema validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Not enough data to summarise.
    #[error("Insufficient data: {0}")]
    InsufficientData(#[from] InsufficientDataError),

    /// Artifact output error.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// Options error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for catalogue reading.
pub type InputResult<T> = Result<T, InputError>;

/// Result type for chart rendering.
pub type ChartResult<T> = Result<T, ValidationError>;

/// Result type for summary building.
pub type SummaryResult<T> = Result<T, InsufficientDataError>;

/// Result type for artifact writing.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let input_err = InputError::EmptyFile;
        let pipeline_err: PipelineError = input_err.into();
        assert!(pipeline_err.to_string().contains("empty"));

        let chart_err = ValidationError::TooFewPoints { required: 2, actual: 1 };
        let pipeline_err: PipelineError = chart_err.into();
        assert!(pipeline_err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_data_format_error_format() {
        let err = DataFormatError::new(5, "release_year", "not an integer").with_value("abc");
        let msg = err.to_string();
        assert!(msg.contains("Row 5"));
        assert!(msg.contains("field 'release_year'"));
        assert!(msg.contains("value 'abc'"));
    }

    #[test]
    fn test_missing_column_names_column() {
        let err = InputError::MissingColumn("listed_in".into());
        assert!(err.to_string().contains("listed_in"));
    }
}
