//! High-level pipeline API: catalogue file to charts and summary.
//!
//! Combines all steps: loading, aggregation, chart rendering, summary
//! building, schema validation and (separately) artifact writing.
//!
//! # Example
//!
//! ```rust,ignore
//! use insights::{analyse_catalogue, write_artifacts, ArtifactWriter, PipelineOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let output = analyse_catalogue(
//!         Path::new("analysis/netflix_titles_sample.csv"),
//!         &PipelineOptions::default(),
//!     )?;
//!     write_artifacts(&output, &ArtifactWriter::default())?;
//!     println!("{} titles analysed", output.summary.data_points.total_titles);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::aggregate::{aggregate, retain_valid_years, Aggregates, SkippedRow, YearPolicy};
use crate::chart::{render, ChartOptions};
use crate::error::{ConfigError, PipelineResult};
use crate::logs::{log_info, log_info_indent, log_stage, log_success, log_warning, Stage};
use crate::models::{ChartKind, ChartPoint, Row, REQUIRED_COLUMNS};
use crate::parser::{load_catalogue_with, require_columns, ParseResult};
use crate::summary::{build_summary, SummaryDocument, SummaryOptions};
use crate::validation::validate_summary;
use crate::writer::ArtifactWriter;

/// Which table a chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSource {
    /// Most common countries, count descending.
    Countries,
    /// Most common genres, count descending.
    Genres,
    /// Every release year, ascending.
    ReleaseYears,
}

/// One chart to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub file_name: String,
    pub kind: ChartKind,
    pub source: ChartSource,
    /// Keep only the first `limit` points; `None` keeps all.
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub options: ChartOptions,
}

impl ChartSpec {
    /// Build the series this chart plots.
    pub fn series(&self, aggregates: &Aggregates) -> Vec<ChartPoint> {
        let limit = self.limit.unwrap_or(usize::MAX);
        match self.source {
            ChartSource::Countries => aggregates
                .country_counts
                .top_n(limit)
                .into_iter()
                .map(|(country, count)| ChartPoint::new(country.as_str(), count as f64))
                .collect(),
            ChartSource::Genres => aggregates
                .genre_counts
                .top_n(limit)
                .into_iter()
                .map(|(genre, count)| ChartPoint::new(genre.as_str(), count as f64))
                .collect(),
            ChartSource::ReleaseYears => aggregates
                .year_counts
                .sorted_by_key()
                .into_iter()
                .take(limit)
                .map(|(year, count)| ChartPoint::new(year.to_string(), count as f64))
                .collect(),
        }
    }
}

/// Default chart line-up: top countries, top genres, releases per year.
pub fn default_charts() -> Vec<ChartSpec> {
    vec![
        ChartSpec {
            title: "Where titles are produced".to_string(),
            file_name: "titles_by_country.svg".to_string(),
            kind: ChartKind::Bar,
            source: ChartSource::Countries,
            limit: Some(8),
            options: ChartOptions::default(),
        },
        ChartSpec {
            title: "Most common genres".to_string(),
            file_name: "top_genres.svg".to_string(),
            kind: ChartKind::Bar,
            source: ChartSource::Genres,
            limit: Some(8),
            options: ChartOptions::default().with_color("#22d3ee"),
        },
        ChartSpec {
            title: "Release cadence by year".to_string(),
            file_name: "releases_by_year.svg".to_string(),
            kind: ChartKind::Line,
            source: ChartSource::ReleaseYears,
            limit: None,
            options: ChartOptions::default(),
        },
    ]
}

/// Options for the analysis pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Force the CSV delimiter instead of detecting it
    pub delimiter: Option<char>,

    /// What to do with unparseable release years
    pub year_policy: YearPolicy,

    /// Skip summary schema validation
    pub skip_validation: bool,

    /// Summary settings
    pub summary: SummaryOptions,

    /// Charts to render, in order
    pub charts: Vec<ChartSpec>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            year_policy: YearPolicy::Fail,
            skip_validation: false,
            summary: SummaryOptions::default(),
            charts: default_charts(),
        }
    }
}

impl PipelineOptions {
    /// Load options from a JSON file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Catalogue file information
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// A rendered chart, not yet written.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub title: String,
    pub file_name: String,
    pub kind: ChartKind,
    pub markup: String,
}

/// Result of a complete analysis
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub csv_info: CsvInfo,
    pub aggregates: Aggregates,
    pub charts: Vec<RenderedChart>,
    pub summary: SummaryDocument,
    /// Rows dropped under [`YearPolicy::Skip`]
    pub skipped: Vec<SkippedRow>,
}

/// Analyse a catalogue file.
///
/// This is the main entry point for the pipeline. It:
/// 1. Reads the CSV with auto-detection
/// 2. Checks the required columns
/// 3. Aggregates the frequency tables
/// 4. Renders every configured chart
/// 5. Builds and validates the summary
pub fn analyse_catalogue(path: &Path, options: &PipelineOptions) -> PipelineResult<PipelineOutput> {
    log_stage(Stage::Load);
    log_info(path.display().to_string());
    let parse_result = load_catalogue_with(path, options.delimiter)?;
    analyse_parsed(parse_result, options)
}

/// Analyse already-parsed catalogue data.
pub fn analyse_parsed(parse_result: ParseResult, options: &PipelineOptions) -> PipelineResult<PipelineOutput> {
    let csv_info = describe(&parse_result)?;
    let (rows, aggregates, skipped) = aggregate_rows(parse_result.rows, options.year_policy)?;

    log_stage(Stage::Render);
    let charts = render_charts(&options.charts, &aggregates)?;

    let summary = summarise(&rows, &aggregates, options)?;

    Ok(PipelineOutput {
        csv_info,
        aggregates,
        charts,
        summary,
        skipped,
    })
}

/// Build only the summary of a catalogue file, without charts.
pub fn summarise_catalogue(path: &Path, options: &PipelineOptions) -> PipelineResult<SummaryDocument> {
    log_stage(Stage::Load);
    log_info(path.display().to_string());
    let parse_result = load_catalogue_with(path, options.delimiter)?;
    describe(&parse_result)?;
    let (rows, aggregates, _) = aggregate_rows(parse_result.rows, options.year_policy)?;
    summarise(&rows, &aggregates, options)
}

/// Write every chart and the summary.
///
/// Writes are independent: a failure stops the run but keeps files already written.
pub fn write_artifacts(output: &PipelineOutput, writer: &ArtifactWriter) -> PipelineResult<Vec<PathBuf>> {
    log_stage(Stage::Write);
    let mut written = Vec::with_capacity(output.charts.len() + 1);

    for chart in &output.charts {
        let path = writer.write_chart(&chart.file_name, &chart.markup)?;
        log_info_indent(path.display().to_string(), 1);
        written.push(path);
    }

    let path = writer.write_summary(&output.summary)?;
    log_info_indent(path.display().to_string(), 1);
    written.push(path);

    log_success(format!("{} artifacts written", written.len()));
    Ok(written)
}

/// Log the parse metadata and check the required columns.
fn describe(parse_result: &ParseResult) -> PipelineResult<CsvInfo> {
    log_success(format!("Detected encoding: {}", parse_result.encoding));
    log_success(format!("Detected separator: '{}'", format_delimiter(parse_result.delimiter)));
    log_success(format!("Read {} rows", parse_result.rows.len()));

    require_columns(&parse_result.headers, &REQUIRED_COLUMNS)?;

    Ok(CsvInfo {
        encoding: parse_result.encoding.clone(),
        delimiter: parse_result.delimiter,
        headers: parse_result.headers.clone(),
        row_count: parse_result.rows.len(),
    })
}

/// Apply the year policy, then aggregate.
fn aggregate_rows(
    rows: Vec<Row>,
    policy: YearPolicy,
) -> PipelineResult<(Vec<Row>, Aggregates, Vec<SkippedRow>)> {
    log_stage(Stage::Aggregate);
    let (rows, skipped) = match policy {
        YearPolicy::Fail => (rows, Vec::new()),
        YearPolicy::Skip => retain_valid_years(rows),
    };

    if !skipped.is_empty() {
        log_warning(format!("{} rows skipped (unparseable release year)", skipped.len()));
        for skip in skipped.iter().take(5) {
            log_info_indent(&skip.reason, 1);
        }
    }

    let aggregates = aggregate(&rows)?;
    log_success(format!(
        "{} countries, {} genres, {} release years, {} content types",
        aggregates.country_counts.len(),
        aggregates.genre_counts.len(),
        aggregates.year_counts.len(),
        aggregates.type_counts.len()
    ));

    Ok((rows, aggregates, skipped))
}

fn render_charts(specs: &[ChartSpec], aggregates: &Aggregates) -> PipelineResult<Vec<RenderedChart>> {
    let mut charts = Vec::with_capacity(specs.len());
    for spec in specs {
        let series = spec.series(aggregates);
        let markup = render(spec.kind, &spec.title, &series, &spec.options)?;
        log_success(format!("{} ({} chart, {} points)", spec.file_name, spec.kind, series.len()));
        charts.push(RenderedChart {
            title: spec.title.clone(),
            file_name: spec.file_name.clone(),
            kind: spec.kind,
            markup,
        });
    }
    Ok(charts)
}

fn summarise(rows: &[Row], aggregates: &Aggregates, options: &PipelineOptions) -> PipelineResult<SummaryDocument> {
    log_stage(Stage::Summarise);
    let summary = build_summary(rows, aggregates, &options.summary)?;
    log_success(format!(
        "{} titles, top genre {}, {:.1}% non-US",
        summary.data_points.total_titles,
        summary.data_points.top_genre,
        summary.data_points.non_us_share_pct
    ));

    if options.skip_validation {
        log_info("(validation skipped)");
    } else {
        validate_summary(&summary)?;
        log_success("Summary matches schema");
    }

    Ok(summary)
}

/// Format delimiter for display
fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}
