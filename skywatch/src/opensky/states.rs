//! Decoding of `/api/states/all` responses.
//!
//! A state vector is a positional JSON array. The indices used here:
//!
//! | index | field            | type          |
//! |-------|------------------|---------------|
//! | 0     | icao24           | string        |
//! | 1     | callsign         | string / null |
//! | 2     | origin_country   | string        |
//! | 5     | longitude        | float / null  |
//! | 6     | latitude         | float / null  |
//! | 7     | baro_altitude    | float / null  |
//! | 9     | velocity         | float / null  |
//! | 10    | true_track       | float / null  |

use serde::Deserialize;
use serde_json::Value;

use super::error::FetchError;
use crate::model::{FlightRecord, FlightSet};

/// Vectors shorter than this are skipped.
pub const MIN_STATE_FIELDS: usize = 8;

const ICAO24: usize = 0;
const CALLSIGN: usize = 1;
const ORIGIN_COUNTRY: usize = 2;
const LONGITUDE: usize = 5;
const LATITUDE: usize = 6;
const ALTITUDE: usize = 7;
const VELOCITY: usize = 9;
const HEADING: usize = 10;

#[derive(Deserialize)]
struct StatesResponse {
    #[serde(default)]
    states: Option<Vec<Vec<Value>>>,
}

/// Decode a states response body into a flight set.
///
/// `states` missing or `null` yields an empty set. Null or absent fields
/// default to `0.0` / empty string; a field of the wrong JSON type fails the
/// whole decode. Vectors whose trimmed callsign is empty are dropped.
pub fn decode_states(body: &[u8]) -> Result<FlightSet, FetchError> {
    let response: StatesResponse = serde_json::from_slice(body)?;
    let vectors = response.states.unwrap_or_default();

    let mut flights = FlightSet::new();
    let mut short = 0usize;
    let mut anonymous = 0usize;

    for vector in &vectors {
        if vector.len() < MIN_STATE_FIELDS {
            short += 1;
            continue;
        }
        if !flights.insert(flight_from_vector(vector)?) {
            anonymous += 1;
        }
    }

    tracing::debug!(
        vectors = vectors.len(),
        flights = flights.len(),
        short,
        anonymous,
        "Decoded state vectors"
    );

    Ok(flights)
}

fn flight_from_vector(vector: &[Value]) -> Result<FlightRecord, FetchError> {
    Ok(FlightRecord {
        id: text(vector, CALLSIGN, "callsign")?.trim().to_string(),
        icao24: text(vector, ICAO24, "icao24")?,
        latitude: number(vector, LATITUDE, "latitude")?,
        longitude: number(vector, LONGITUDE, "longitude")?,
        altitude: number(vector, ALTITUDE, "altitude")?,
        velocity: number(vector, VELOCITY, "velocity")?,
        heading: number(vector, HEADING, "heading")?,
        origin_country: text(vector, ORIGIN_COUNTRY, "origin_country")?,
    })
}

fn text(vector: &[Value], index: usize, name: &str) -> Result<String, FetchError> {
    match vector.get(index) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(type_mismatch(name, index, "string", other)),
    }
}

fn number(vector: &[Value], index: usize, name: &str) -> Result<f64, FetchError> {
    match vector.get(index) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| FetchError::Decode(format!("{} (index {}) out of range", name, index))),
        Some(other) => Err(type_mismatch(name, index, "number", other)),
    }
}

fn type_mismatch(name: &str, index: usize, expected: &str, found: &Value) -> FetchError {
    FetchError::Decode(format!(
        "{} (index {}) expected {}, found {}",
        name, index, expected, found
    ))
}
