//! One-shot import of the airport reference table into the shared store.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde_json::Value;
use thiserror::Error;

use crate::model::{AirportRecord, AirportSet};
use crate::store::SharedStore;

/// Errors that can occur while loading the airport table.
#[derive(Debug, Error)]
pub enum AirportLoadError {
    /// The file could not be opened.
    #[error("Unable to open airport file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid JSON.
    #[error("Failed to parse airport data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The top-level JSON value is neither an object nor an array.
    #[error("Airport data must be a JSON object or array")]
    NotACollection,
}

/// Read and parse the airport table at `path`.
pub fn load_airports(path: &Path) -> Result<AirportSet, AirportLoadError> {
    let file = File::open(path).map_err(|source| AirportLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_airports(BufReader::new(file))
}

/// Parse an airport table from any reader.
///
/// Missing or mistyped fields take their defaults instead of rejecting the
/// entry; only the ICAO code is required.
pub fn parse_airports<R: Read>(reader: R) -> Result<AirportSet, AirportLoadError> {
    let root: Value = serde_json::from_reader(reader)?;

    let entries: Box<dyn Iterator<Item = &Value>> = match &root {
        Value::Object(map) => Box::new(map.values()),
        Value::Array(items) => Box::new(items.iter()),
        _ => return Err(AirportLoadError::NotACollection),
    };

    let mut airports = AirportSet::new();
    let mut dropped = 0usize;
    for entry in entries {
        if !airports.insert(airport_from_value(entry)) {
            dropped += 1;
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "Skipped airport entries without an ICAO code");
    }

    Ok(airports)
}

fn airport_from_value(value: &Value) -> AirportRecord {
    AirportRecord {
        icao: string_field(value, "icao"),
        iata: string_field(value, "iata"),
        name: string_field(value, "name"),
        city: string_field(value, "city"),
        region: string_field(value, "state"),
        country: string_field(value, "country"),
        elevation: value
            .get("elevation")
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .and_then(|e| i32::try_from(e).ok())
            .unwrap_or(0),
        latitude: float_field(value, "lat"),
        longitude: float_field(value, "lon"),
        timezone: string_field(value, "tz"),
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn float_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Loads the airport table into a [`SharedStore`].
pub struct ReferenceLoader;

impl ReferenceLoader {
    /// Load `path` and replace the store's airport mapping in one step.
    ///
    /// On failure the error is logged, the mapping is left as it was and the
    /// data state is not advanced to ready. Returns the number of airports
    /// published.
    pub fn run(store: &SharedStore, path: &Path) -> Result<usize, AirportLoadError> {
        store.mark_loading();
        tracing::info!(path = %path.display(), "Loading airport reference table");

        match load_airports(path) {
            Ok(airports) => {
                let count = airports.len();
                store.replace_airports(airports);
                tracing::info!(count, "Loaded airports");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Airport table not loaded");
                Err(e)
            }
        }
    }

    /// Run the loader on its own named thread.
    pub fn spawn(
        store: Arc<SharedStore>,
        path: PathBuf,
    ) -> io::Result<JoinHandle<Result<usize, AirportLoadError>>> {
        thread::Builder::new()
            .name("airport-loader".to_string())
            .spawn(move || Self::run(&store, &path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DataState;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "KSFO": {
            "icao": "KSFO", "iata": "SFO", "name": "San Francisco International Airport",
            "city": "San Francisco", "state": "California", "country": "US",
            "elevation": 13, "lat": 37.61899948120117, "lon": -122.375, "tz": "America/Los_Angeles"
        },
        "00AK": {
            "icao": "00AK", "iata": "", "name": "Lowell Field", "city": "Anchor Point",
            "state": "Alaska", "country": "US", "elevation": 450, "lat": 59.94919968, "lon": -151.695999146,
            "tz": "America/Anchorage"
        },
        "XXXX": { "iata": "ABC" }
    }"#;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_object_drops_missing_icao() {
        let airports = parse_airports(SAMPLE.as_bytes()).unwrap();

        assert_eq!(airports.len(), 2);
        assert!(airports.iter().all(|a| !a.icao.is_empty()));
        assert!(airports.iter().all(|a| a.iata != "ABC"));

        let sfo = airports.get("KSFO").unwrap();
        assert_eq!(sfo.region, "California");
        assert_eq!(sfo.elevation, 13);
        assert!((sfo.longitude - (-122.375)).abs() < 1e-9);
        assert_eq!(sfo.timezone, "America/Los_Angeles");
    }

    #[test]
    fn test_parse_array() {
        let json = r#"[{"icao": "EGLL", "iata": "LHR"}, {"icao": "LFPG"}]"#;
        let airports = parse_airports(json.as_bytes()).unwrap();
        assert_eq!(airports.len(), 2);
        assert_eq!(airports.get("LFPG").unwrap().iata, "");
    }

    #[test]
    fn test_mistyped_fields_take_defaults() {
        let json = r#"{"a": {
            "icao": "KJFK", "iata": null, "name": 42, "elevation": "high",
            "lat": "north", "lon": null
        }}"#;
        let airports = parse_airports(json.as_bytes()).unwrap();
        let jfk = airports.get("KJFK").unwrap();

        assert_eq!(jfk.iata, "");
        assert_eq!(jfk.name, "");
        assert_eq!(jfk.elevation, 0);
        assert_eq!(jfk.latitude, 0.0);
        assert_eq!(jfk.longitude, 0.0);
    }

    #[test]
    fn test_fractional_elevation_truncated() {
        let json = r#"[{"icao": "KDEN", "elevation": 5433.8}]"#;
        let airports = parse_airports(json.as_bytes()).unwrap();
        assert_eq!(airports.get("KDEN").unwrap().elevation, 5433);
    }

    #[test]
    fn test_non_collection_rejected() {
        let result = parse_airports("42".as_bytes());
        assert!(matches!(result, Err(AirportLoadError::NotACollection)));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let result = parse_airports("{ not json".as_bytes());
        assert!(matches!(result, Err(AirportLoadError::Parse(_))));
    }

    #[test]
    fn test_run_publishes_and_marks_ready() {
        let file = write_temp(SAMPLE);
        let store = SharedStore::new();

        let count = ReferenceLoader::run(&store, file.path()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(store.airport_count(), 2);
        assert!(store.is_data_ready());
    }

    #[test]
    fn test_run_missing_file_leaves_store_unchanged() {
        let store = SharedStore::new();
        let result = ReferenceLoader::run(&store, Path::new("/nonexistent/airports.json"));

        assert!(matches!(result, Err(AirportLoadError::Open { .. })));
        assert_eq!(store.airport_count(), 0);
        assert!(!store.is_data_ready());
        assert_eq!(store.data_state(), DataState::Loading);
    }

    #[test]
    fn test_spawn_runs_on_own_thread() {
        let file = write_temp(SAMPLE);
        let store = Arc::new(SharedStore::new());

        let handle = ReferenceLoader::spawn(Arc::clone(&store), file.path().to_path_buf()).unwrap();
        let count = handle.join().unwrap().unwrap();

        assert_eq!(count, 2);
        assert!(store.airport("00AK").is_some());
    }
}
