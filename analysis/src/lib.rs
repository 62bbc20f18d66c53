//! # Insights - Catalogue analytics for streaming titles
//!
//! Insights reads a streaming catalogue export (one row per title), counts
//! titles per country, genre, release year and content type, renders the
//! results as SVG charts and writes a narrative JSON summary for the
//! presentation layer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Aggregate  │──┬─▶│  SVG charts │
//! │  (ISO/UTF8) │     │  (auto-enc) │     │ (frequency) │  │  └─────────────┘
//! └─────────────┘     └─────────────┘     └─────────────┘  │  ┌─────────────┐
//!                                                          └─▶│ Summary JSON│
//!                                                             │ (validated) │
//!                                                             └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use insights::{analyse_catalogue, write_artifacts, ArtifactWriter, PipelineOptions};
//! use std::path::Path;
//!
//! fn main() {
//!     let output = analyse_catalogue(Path::new("titles.csv"), &PipelineOptions::default()).unwrap();
//!     write_artifacts(&output, &ArtifactWriter::default()).unwrap();
//!     println!("Analysed {} titles", output.summary.data_points.total_titles);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (Row, ChartPoint, ChartKind)
//! - [`parser`] - CSV parsing with auto-detection
//! - [`transform`] - Normalization, frequency tables, aggregation and pipeline
//! - [`chart`] - SVG bar and line charts
//! - [`summary`] - Insight summary document
//! - [`validation`] - Summary schema validation
//! - [`writer`] - Artifact output
//! - [`logs`] - Progress logs

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod chart;
pub mod summary;
pub mod writer;

// Validation
pub mod validation;

// Progress
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError,
    DataFormatError,
    InputError,
    InsufficientDataError,
    PipelineError,
    PipelineResult,
    ValidationError,
    WriteError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    ChartKind,
    ChartPoint,
    Row,
    REQUIRED_COLUMNS,
};

// =============================================================================
// Re-exports - Parser
// =============================================================================

pub use parser::{
    load_catalogue,
    load_catalogue_with,
    parse_bytes_auto,
    parse_str,
    require_columns,
    ParseResult,
};

// =============================================================================
// Re-exports - Aggregation
// =============================================================================

pub use transform::{
    aggregate,
    normalize,
    retain_valid_years,
    Aggregates,
    FrequencyTable,
    NestedFrequencyTable,
    SkippedRow,
    YearPolicy,
};

// =============================================================================
// Re-exports - Charts
// =============================================================================

pub use chart::{render, render_bar, render_line, ChartOptions};

// =============================================================================
// Re-exports - Summary
// =============================================================================

pub use summary::{build_summary, SummaryDocument, SummaryOptions};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{
    is_valid,
    is_valid_summary_value,
    validate,
    validate_summary,
    validate_summary_value,
};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use writer::{ArtifactWriter, DEFAULT_IMAGE_DIR, DEFAULT_SUMMARY_PATH};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    analyse_catalogue,
    analyse_parsed,
    default_charts,
    summarise_catalogue,
    write_artifacts,
    ChartSource,
    ChartSpec,
    CsvInfo,
    PipelineOptions,
    PipelineOutput,
    RenderedChart,
};
