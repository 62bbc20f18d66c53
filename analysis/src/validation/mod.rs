//! JSON Schema validation for the insight summary.
//!
//! The presentation layer reads the summary file without any checks of its
//! own, so the pipeline validates the document against a JSON Schema
//! (Draft 7) before writing it.
//!
//! # Embedded Schema
//!
//! Embedded at compile time from `schemas/catalogue-summary.json`.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use insights::validation::validate;
//!
//! let schema = json!({
//!     "type": "object",
//!     "required": ["name"],
//!     "properties": { "name": { "type": "string" } }
//! });
//!
//! assert!(validate(&schema, &json!({ "name": "test" })).is_ok());
//! assert!(validate(&schema, &json!({ "age": 42 })).is_err());
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::ValidationError;
use crate::summary::SummaryDocument;

const SUMMARY_SCHEMA_SOURCE: &str = include_str!("../../schemas/catalogue-summary.json");

static SUMMARY_SCHEMA: Lazy<Result<Value, String>> = Lazy::new(|| {
    serde_json::from_str(SUMMARY_SCHEMA_SOURCE).map_err(|e| format!("Invalid embedded schema: {}", e))
});

/// Validate `data` against `schema`.
///
/// # Returns
/// * `Ok(())` when valid
/// * `Err(Vec<String>)` with every violation otherwise
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick check, no messages.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate a summary, already as JSON, against the embedded schema.
pub fn validate_summary_value(data: &Value) -> Result<(), Vec<String>> {
    let schema = SUMMARY_SCHEMA.as_ref().map_err(|e| vec![e.clone()])?;
    validate(schema, data)
}

/// Quick check against the summary schema.
pub fn is_valid_summary_value(data: &Value) -> bool {
    validate_summary_value(data).is_ok()
}

/// Validate a built summary document.
pub fn validate_summary(summary: &SummaryDocument) -> Result<(), ValidationError> {
    let value = serde_json::to_value(summary).map_err(|e| ValidationError::SchemaError {
        errors: vec![e.to_string()],
    })?;
    validate_summary_value(&value).map_err(|errors| ValidationError::SchemaError { errors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_summary() -> Value {
        json!({
            "project_title": "Global Netflix Catalogue Deep Dive",
            "data_points": {
                "total_titles": 4,
                "unique_countries": 3,
                "top_genre": "Dramas",
                "non_us_share_pct": 50.0,
                "most_active_year": 2020
            },
            "insight_cards": [{ "title": "Titles analysed", "value": "4", "description": "..." }],
            "narrative": [{ "heading": "Global reach", "detail": "..." }],
            "country_genres": [{ "country": "India", "title_count": 2, "top_genres": ["Dramas"] }],
            "type_mix": { "Movie": 3, "TV Show": 1 },
            "workflow": [{ "step": "Ingestion", "detail": "..." }],
            "recommendations": ["Invest in documentaries."]
        })
    }

    #[test]
    fn test_embedded_schema_parses() {
        assert!(SUMMARY_SCHEMA.is_ok());
    }

    #[test]
    fn test_valid_summary() {
        assert!(is_valid_summary_value(&valid_summary()));
    }

    #[test]
    fn test_missing_top_level_key() {
        let mut summary = valid_summary();
        summary.as_object_mut().unwrap().remove("type_mix");
        let errors = validate_summary_value(&summary).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("type_mix")));
    }

    #[test]
    fn test_share_out_of_range() {
        let mut summary = valid_summary();
        summary["data_points"]["non_us_share_pct"] = json!(120.5);
        assert!(!is_valid_summary_value(&summary));
    }

    #[test]
    fn test_generic_validate() {
        let schema = json!({ "type": "object", "required": ["name"] });
        assert!(validate(&schema, &json!({ "name": "x" })).is_ok());
        assert!(!is_valid(&schema, &json!({})));
    }
}
