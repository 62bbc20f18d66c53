//! Insight summary: rankings, shares and narrative text.
//!
//! Building happens in two steps:
//!
//! 1. [`compute_stats`] derives the numbers (top-1 picks, US share, growth trend)
//! 2. [`build_summary`] interpolates them into the fixed card and narrative templates
//!
//! # Example
//!
//! ```rust,ignore
//! use insights::{aggregate, build_summary, SummaryOptions};
//!
//! let aggregates = aggregate(&rows)?;
//! let summary = build_summary(&rows, &aggregates, &SummaryOptions::default())?;
//! println!("{}% non-US", summary.data_points.non_us_share_pct);
//! ```

pub mod document;

pub use document::{
    CountryGenres, DataPoints, InsightCard, NarrativeSection, SummaryDocument, WorkflowStep,
};

use serde::{Deserialize, Serialize};

use crate::error::{InsufficientDataError, SummaryResult};
use crate::models::{Row, COUNTRY_COLUMN};
use crate::transform::aggregate::Aggregates;

/// Substring that flags a title as (co-)produced in the United States.
///
/// Matched against the raw country cell, so any co-production counts.
pub const US_MARKER: &str = "United States";

/// Genre quoted in the documentary narrative.
const DOCUMENTARY_GENRE: &str = "Documentaries";

/// Summary settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    pub project_title: String,
    /// Countries listed in `country_genres`.
    pub top_countries: usize,
    /// Genres listed per country.
    pub genres_per_country: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            project_title: "Global Netflix Catalogue Deep Dive".to_string(),
            top_countries: 5,
            genres_per_country: 3,
        }
    }
}

/// Numbers the summary text is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_titles: usize,
    pub unique_countries: usize,
    pub most_active_year: i32,
    pub most_active_year_count: usize,
    pub top_genre: String,
    pub top_genre_count: usize,
    pub us_titles: usize,
    pub non_us_share_pct: f64,
    /// `(year, titles)` ascending by year.
    pub growth_trend: Vec<(i32, usize)>,
}

impl SummaryStats {
    /// Earliest release year and its title count.
    pub fn first_year(&self) -> Option<(i32, usize)> {
        self.growth_trend.first().copied()
    }

    /// Latest release year and its title count.
    pub fn latest_year(&self) -> Option<(i32, usize)> {
        self.growth_trend.last().copied()
    }
}

/// Round to one decimal place, ties to even on the exact binary value.
///
/// `81.25` becomes `81.2`, `66.666..` becomes `66.7`.
pub fn round_one_decimal(value: f64) -> f64 {
    // Float formatting rounds the exact decimal expansion half to even
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Count rows whose raw country cell mentions the United States.
pub fn count_us_titles(rows: &[Row]) -> usize {
    rows.iter()
        .filter(|row| row.field(COUNTRY_COLUMN).contains(US_MARKER))
        .count()
}

/// Derive the summary figures.
pub fn compute_stats(rows: &[Row], aggregates: &Aggregates) -> SummaryResult<SummaryStats> {
    if rows.is_empty() {
        return Err(InsufficientDataError::NoRows);
    }

    let (most_active_year, most_active_year_count) = aggregates
        .year_counts
        .most_common()
        .map(|(year, count)| (*year, count))
        .ok_or(InsufficientDataError::EmptyTable("release years"))?;

    let (top_genre, top_genre_count) = aggregates
        .genre_counts
        .most_common()
        .map(|(genre, count)| (genre.clone(), count))
        .ok_or(InsufficientDataError::EmptyTable("genres"))?;

    if aggregates.country_counts.is_empty() {
        return Err(InsufficientDataError::EmptyTable("countries"));
    }

    let total_titles = rows.len();
    let us_titles = count_us_titles(rows);
    let non_us_share_pct =
        round_one_decimal((total_titles - us_titles) as f64 / total_titles as f64 * 100.0);

    let growth_trend = aggregates
        .year_counts
        .sorted_by_key()
        .into_iter()
        .map(|(year, count)| (*year, count))
        .collect();

    Ok(SummaryStats {
        total_titles,
        unique_countries: aggregates.country_counts.len(),
        most_active_year,
        most_active_year_count,
        top_genre,
        top_genre_count,
        us_titles,
        non_us_share_pct,
        growth_trend,
    })
}

/// Top countries with their leading genres.
pub fn country_genres(aggregates: &Aggregates, options: &SummaryOptions) -> Vec<CountryGenres> {
    aggregates
        .country_counts
        .top_n(options.top_countries)
        .into_iter()
        .map(|(country, count)| CountryGenres {
            country: country.clone(),
            title_count: count,
            top_genres: aggregates
                .country_genre_counts
                .top_n(country.as_str(), options.genres_per_country)
                .into_iter()
                .map(|(genre, _)| genre.clone())
                .collect(),
        })
        .collect()
}

/// Build the summary document.
pub fn build_summary(
    rows: &[Row],
    aggregates: &Aggregates,
    options: &SummaryOptions,
) -> SummaryResult<SummaryDocument> {
    let stats = compute_stats(rows, aggregates)?;
    let (first_year, first_year_count) = stats
        .first_year()
        .ok_or(InsufficientDataError::EmptyTable("release years"))?;
    let (latest_year, latest_year_count) = stats
        .latest_year()
        .ok_or(InsufficientDataError::EmptyTable("release years"))?;
    let documentary_slots = aggregates.genre_counts.get(DOCUMENTARY_GENRE);

    let insight_cards = vec![
        InsightCard::new(
            "Titles analysed",
            stats.total_titles.to_string(),
            format!(
                "Curated catalogue entries spanning films and series from {}-{}.",
                first_year, latest_year
            ),
        ),
        InsightCard::new(
            "Countries represented",
            stats.unique_countries.to_string(),
            "A globally diverse line-up with heavy representation from emerging markets.",
        ),
        InsightCard::new(
            "Top genre",
            stats.top_genre.clone(),
            format!(
                "{} appearances across the library, driven by international audiences.",
                stats.top_genre_count
            ),
        ),
        InsightCard::new(
            "Peak release year",
            stats.most_active_year.to_string(),
            format!(
                "{} titles launched, marking the catalogue's fastest growth year.",
                stats.most_active_year_count
            ),
        ),
    ];

    let narrative = vec![
        NarrativeSection::new(
            "Global reach is accelerating",
            format!(
                "{:.1}% of the catalogue now comes from outside the United States, signalling a deliberate localisation strategy.",
                stats.non_us_share_pct
            ),
        ),
        NarrativeSection::new(
            "Genre investments favour documentaries and dramas",
            format!(
                "Documentary-led genres take {} slots in the top-performing categories, pairing with drama formats for cross-market appeal.",
                documentary_slots
            ),
        ),
        NarrativeSection::new(
            "Consistent year-on-year growth",
            format!(
                "Annual releases grew from {} titles in {} to {} launches by {}, underscoring resilient production pipelines.",
                first_year_count, first_year, latest_year_count, latest_year
            ),
        ),
    ];

    let workflow = vec![
        WorkflowStep::new(
            "Data ingestion & cleaning",
            "Parsed Netflix title exports, standardised multi-select fields, and resolved geographic duplicates.",
        ),
        WorkflowStep::new(
            "Exploratory analysis",
            "Profiled release cadence, geographic spread, and genre depth to uncover high-level patterns.",
        ),
        WorkflowStep::new(
            "Storyboarding",
            "Built a Power BI storyboard to translate metrics into stakeholder-friendly visuals and executive insights.",
        ),
    ];

    let recommendations = vec![
        "Double down on documentary and drama formats in South Korea, India, and Brazil where engagement is accelerating.".to_string(),
        "Prototype cross-genre bundles (music + documentary) for LATAM markets to test retention lifts.".to_string(),
        "Leverage Power BI dashboards for monthly content planning reviews alongside regional leads.".to_string(),
    ];

    Ok(SummaryDocument {
        project_title: options.project_title.clone(),
        data_points: DataPoints {
            total_titles: stats.total_titles,
            unique_countries: stats.unique_countries,
            top_genre: stats.top_genre.clone(),
            non_us_share_pct: stats.non_us_share_pct,
            most_active_year: stats.most_active_year,
        },
        insight_cards,
        narrative,
        country_genres: country_genres(aggregates, options),
        type_mix: aggregates.type_counts.clone(),
        workflow,
        recommendations,
    })
}
