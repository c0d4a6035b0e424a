use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use crate::models::{Boundary, Listing};

/// Errors that can occur when loading a data snapshot
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a JSON document holding either an array of records or a single record.
///
/// Records that fail to decode are logged and skipped.
pub fn parse_records<T: DeserializeOwned>(document: Value, kind: &str) -> Vec<T> {
    let records = match document {
        Value::Array(items) => items,
        single => vec![single],
    };

    let total = records.len();
    let parsed: Vec<T> = records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| match serde_json::from_value(record) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Skipping {} record #{}: {}", kind, position, e);
                None
            }
        })
        .collect();

    if parsed.len() < total {
        tracing::warn!("Loaded {} of {} {} records", parsed.len(), total, kind);
    }

    parsed
}

fn read_document(path: &Path) -> Result<Value, LoadError> {
    let display = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| LoadError::Json { path: display, source })
}

/// Load listings from a JSON file
pub fn load_listings<P: AsRef<Path>>(path: P) -> Result<Vec<Listing>, LoadError> {
    let document = read_document(path.as_ref())?;
    Ok(parse_records(document, "listing"))
}

/// Load boundaries from a JSON file
pub fn load_boundaries<P: AsRef<Path>>(path: P) -> Result<Vec<Boundary>, LoadError> {
    let document = read_document(path.as_ref())?;
    Ok(parse_records(document, "boundary"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_record_document() {
        let boundaries: Vec<Boundary> = parse_records(
            json!({"_id": "b1", "category": "CITY", "city": "Austin", "country": "US", "display": "Austin, TX"}),
            "boundary",
        );

        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].id, "b1");
    }

    #[test]
    fn test_bad_records_are_skipped() {
        let listings: Vec<Listing> = parse_records(
            json!([
                {
                    "list_id": {"$numberLong": "42"},
                    "list_address": {"coordinates_gp": {"lat": 30.0, "lon": -97.0}},
                    "geo": {"city": [949963], "boundary_agg": ["949963"]}
                },
                {"list_id": "missing-address"},
                "not even an object"
            ]),
            "listing",
        );

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].list_id.as_key(), "42");
    }

    #[test]
    fn test_missing_file() {
        let result = load_listings("/definitely/not/here.json");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
