//! Domain models for the catalogue insights pipeline.
//!
//! - [`Row`] - One catalogue entry, keyed by header name
//! - [`ChartPoint`] - A labeled value plotted by the chart renderer
//! - [`ChartKind`] - Bar or line chart

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Catalogue Columns
// =============================================================================

/// Content type column (`Movie`, `TV Show`, ...).
pub const TYPE_COLUMN: &str = "type";
/// Comma-separated production countries.
pub const COUNTRY_COLUMN: &str = "country";
/// Comma-separated genres.
pub const GENRES_COLUMN: &str = "listed_in";
/// Integer release year.
pub const RELEASE_YEAR_COLUMN: &str = "release_year";

/// Columns the aggregator reads. Any other column is carried but ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    TYPE_COLUMN,
    COUNTRY_COLUMN,
    GENRES_COLUMN,
    RELEASE_YEAR_COLUMN,
];

// =============================================================================
// Row
// =============================================================================

/// A single catalogue entry: header name to raw cell value.
///
/// Fields are kept sorted by name, so serialized rows have a stable key
/// order. Cells are kept verbatim (untrimmed). Splitting and trimming happen in
/// [`crate::transform::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(field, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Raw value of a field, if the column exists.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Raw value of a field, empty when the column is absent.
    pub fn field(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// =============================================================================
// Charts
// =============================================================================

/// One labeled value of a chart series.
///
/// Series order is significant: it is the x-axis order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: impl Into<f64>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Chart geometry to render a series with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Line => write!(f, "line"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
