//! Summary document consumed by the presentation layer.
//!
//! Field order matches the JSON object order.

use serde::Serialize;

use crate::transform::frequency::FrequencyTable;

/// The complete insight summary.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryDocument {
    pub project_title: String,
    pub data_points: DataPoints,
    pub insight_cards: Vec<InsightCard>,
    pub narrative: Vec<NarrativeSection>,
    pub country_genres: Vec<CountryGenres>,
    /// Content type to title count, in catalogue order.
    pub type_mix: FrequencyTable<String>,
    pub workflow: Vec<WorkflowStep>,
    pub recommendations: Vec<String>,
}

/// Headline figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoints {
    pub total_titles: usize,
    pub unique_countries: usize,
    pub top_genre: String,
    /// Percentage with one decimal.
    pub non_us_share_pct: f64,
    pub most_active_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightCard {
    pub title: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeSection {
    pub heading: String,
    pub detail: String,
}

/// A leading country and the genres it produces most.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryGenres {
    pub country: String,
    pub title_count: usize,
    pub top_genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowStep {
    pub step: String,
    pub detail: String,
}

impl InsightCard {
    pub(crate) fn new(
        title: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            description: description.into(),
        }
    }
}

impl NarrativeSection {
    pub(crate) fn new(heading: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            detail: detail.into(),
        }
    }
}

impl WorkflowStep {
    pub(crate) fn new(step: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            detail: detail.into(),
        }
    }
}
