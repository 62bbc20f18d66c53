//! Transformation module.
//!
//! This module turns catalogue rows into aggregates:
//! - Normalize: multi-value cells to trimmed tokens
//! - Frequency: insertion-ordered counters
//! - Aggregate: per-column frequency tables
//! - Pipeline: Main analysis pipeline

pub mod aggregate;
pub mod frequency;
pub mod normalize;
pub mod pipeline;

pub use aggregate::{aggregate, parse_release_year, retain_valid_years, Aggregates, SkippedRow, YearPolicy};
pub use frequency::{FrequencyTable, NestedFrequencyTable};
pub use normalize::{join_tokens, normalize, MULTI_VALUE_SEPARATOR};
pub use pipeline::*;
