//! Build the catalogue frequency tables.
//!
//! One pass over the rows fills five co-indexed tables:
//!
//! ```text
//! Row { country: "India, United States", listed_in: "Dramas, Comedies", ... }
//!   → country_counts        India +1, United States +1
//!   → genre_counts          Dramas +1, Comedies +1
//!   → country_genre_counts  India/Dramas, India/Comedies,
//!                           United States/Dramas, United States/Comedies  (+1 each)
//!   → year_counts, type_counts  +1
//! ```
//!
//! A title produced in several countries contributes its full genre set to
//! each of them.

use serde::{Deserialize, Serialize};

use super::frequency::{FrequencyTable, NestedFrequencyTable};
use super::normalize::normalize;
use crate::error::DataFormatError;
use crate::models::{Row, COUNTRY_COLUMN, GENRES_COLUMN, RELEASE_YEAR_COLUMN, TYPE_COLUMN};

/// The five frequency structures derived from a catalogue.
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub country_counts: FrequencyTable<String>,
    pub genre_counts: FrequencyTable<String>,
    pub year_counts: FrequencyTable<i32>,
    pub type_counts: FrequencyTable<String>,
    pub country_genre_counts: NestedFrequencyTable<String, String>,
}

/// What to do with a row whose release year is not an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearPolicy {
    /// Abort the run on the first bad row.
    #[default]
    Fail,
    /// Drop the row, report it, and keep going.
    Skip,
}

/// A row dropped under [`YearPolicy::Skip`].
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    /// Zero-based index of the row in the loaded catalogue
    pub row: usize,
    pub reason: String,
}

/// Parse the release year of a row.
pub fn parse_release_year(row: &Row, index: usize) -> Result<i32, DataFormatError> {
    let raw = row.get(RELEASE_YEAR_COLUMN).ok_or_else(|| {
        DataFormatError::new(index, RELEASE_YEAR_COLUMN, "missing release year")
    })?;

    raw.trim().parse::<i32>().map_err(|e| {
        DataFormatError::new(index, RELEASE_YEAR_COLUMN, format!("not an integer ({})", e))
            .with_value(raw)
    })
}

/// Aggregate all rows. Fails on the first row with an unparseable year.
pub fn aggregate(rows: &[Row]) -> Result<Aggregates, DataFormatError> {
    let mut aggregates = Aggregates::default();

    for (index, row) in rows.iter().enumerate() {
        let countries = normalize(row.field(COUNTRY_COLUMN));
        let genres = normalize(row.field(GENRES_COLUMN));
        let release_year = parse_release_year(row, index)?;
        let content_type = row.field(TYPE_COLUMN).trim().to_string();

        aggregates.year_counts.increment(release_year);
        aggregates.type_counts.increment(content_type);

        for country in &countries {
            aggregates.country_counts.increment(country.clone());
            if genres.is_empty() {
                continue;
            }
            let per_country = aggregates.country_genre_counts.entry(country.clone());
            for genre in &genres {
                per_country.increment(genre.clone());
            }
        }

        for genre in genres {
            aggregates.genre_counts.increment(genre);
        }
    }

    Ok(aggregates)
}

/// Split rows into those with a parseable release year and those without.
pub fn retain_valid_years(rows: Vec<Row>) -> (Vec<Row>, Vec<SkippedRow>) {
    let mut kept = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        match parse_release_year(&row, index) {
            Ok(_) => kept.push(row),
            Err(e) => skipped.push(SkippedRow {
                row: index,
                reason: e.to_string(),
            }),
        }
    }

    (kept, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, genres: &str, year: &str, kind: &str) -> Row {
        Row::from_pairs([
            ("country", country),
            ("listed_in", genres),
            ("release_year", year),
            ("type", kind),
        ])
    }

    fn scenario() -> Vec<Row> {
        vec![
            row("United States", "Drama, Comedy", "2020", "Movie"),
            row("India", "Drama", "2020", "Movie"),
            row("India, United States", "Documentaries", "2019", "TV Show"),
            row("Brazil", "Comedy", "2021", "Movie"),
        ]
    }

    #[test]
    fn test_scenario_tables() {
        let agg = aggregate(&scenario()).unwrap();

        assert_eq!(agg.year_counts.get(&2020), 2);
        assert_eq!(agg.year_counts.get(&2019), 1);
        assert_eq!(agg.year_counts.get(&2021), 1);

        assert_eq!(agg.country_counts.get("United States"), 2);
        assert_eq!(agg.country_counts.get("India"), 2);
        assert_eq!(agg.country_counts.get("Brazil"), 1);

        let india = agg.country_genre_counts.get("India").unwrap();
        assert_eq!(india.len(), 2);
        assert_eq!(india.get("Drama"), 1);
        assert_eq!(india.get("Documentaries"), 1);

        assert_eq!(agg.type_counts.get("Movie"), 3);
        assert_eq!(agg.type_counts.get("TV Show"), 1);
    }

    #[test]
    fn test_totals_match_row_count() {
        let rows = scenario();
        let agg = aggregate(&rows).unwrap();
        assert_eq!(agg.year_counts.total(), rows.len());
        assert_eq!(agg.type_counts.total(), rows.len());
    }

    #[test]
    fn test_multi_country_fan_out() {
        let rows = vec![row("A, B", "X, Y", "2020", "Movie")];
        let agg = aggregate(&rows).unwrap();

        for country in ["A", "B"] {
            for genre in ["X", "Y"] {
                assert_eq!(agg.country_genre_counts.count(country, genre), 1);
            }
        }
        assert_eq!(agg.genre_counts.get("X"), 1);
        assert_eq!(agg.genre_counts.total(), 2);
    }

    #[test]
    fn test_row_without_country_still_counts() {
        let rows = vec![row("", "Dramas", "2018", " Movie ")];
        let agg = aggregate(&rows).unwrap();

        assert!(agg.country_counts.is_empty());
        assert!(agg.country_genre_counts.is_empty());
        assert_eq!(agg.genre_counts.get("Dramas"), 1);
        assert_eq!(agg.year_counts.get(&2018), 1);
        assert_eq!(agg.type_counts.get("Movie"), 1);
    }

    #[test]
    fn test_country_without_genres_has_no_genre_table() {
        let rows = vec![
            row("India", "", "2020", "Movie"),
            row("Brazil", "Comedies", "2020", "Movie"),
        ];
        let agg = aggregate(&rows).unwrap();

        assert_eq!(agg.country_counts.get("India"), 1);
        assert!(agg.country_genre_counts.get("India").is_none());
        assert_eq!(agg.country_genre_counts.len(), 1);
        assert_eq!(agg.country_genre_counts.count("Brazil", "Comedies"), 1);
    }

    #[test]
    fn test_bad_year_fails_with_row_index() {
        let mut rows = scenario();
        rows.push(row("India", "Dramas", "20x1", "Movie"));

        let err = aggregate(&rows).unwrap_err();
        assert_eq!(err.row, 4);
        assert_eq!(err.field, "release_year");
        assert_eq!(err.value, "20x1");
    }

    #[test]
    fn test_missing_year_column_fails() {
        let rows = vec![Row::from_pairs([("country", "India")])];
        let err = aggregate(&rows).unwrap_err();
        assert_eq!(err.row, 0);
        assert!(err.message.contains("missing"));
    }

    #[test]
    fn test_year_with_whitespace_parses() {
        let rows = vec![row("India", "Dramas", " 2017 ", "Movie")];
        let agg = aggregate(&rows).unwrap();
        assert_eq!(agg.year_counts.get(&2017), 1);
    }

    #[test]
    fn test_retain_valid_years() {
        let rows = vec![
            row("India", "Dramas", "2020", "Movie"),
            row("India", "Dramas", "", "Movie"),
            row("Brazil", "Comedies", "unknown", "Movie"),
        ];
        let (kept, skipped) = retain_valid_years(rows);

        assert_eq!(kept.len(), 1);
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].row, 1);
        assert_eq!(skipped[1].row, 2);
        assert!(aggregate(&kept).is_ok());
    }
}
