//! Live flight records derived from OpenSky state vectors.

use std::collections::HashMap;

use serde::Serialize;

/// One aircraft as seen in the most recent fetch cycle.
///
/// Identity is the trimmed callsign. Records are never updated in place;
/// every cycle replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlightRecord {
    /// Callsign, e.g. `"DAL123"`.
    pub id: String,
    /// ICAO 24-bit transponder address in hex.
    pub icao24: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Barometric altitude in meters.
    pub altitude: f64,
    /// Ground speed in m/s.
    pub velocity: f64,
    /// True track in degrees clockwise from north.
    pub heading: f64,
    /// Country inferred from the transponder address.
    pub origin_country: String,
}

/// Flight records keyed by callsign.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightSet {
    flights: HashMap<String, FlightRecord>,
}

impl FlightSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its own id.
    ///
    /// Returns `false` and drops the record when the id is empty. A record
    /// with an id already present replaces the earlier one.
    pub fn insert(&mut self, record: FlightRecord) -> bool {
        if record.id.is_empty() {
            return false;
        }
        self.flights.insert(record.id.clone(), record);
        true
    }

    /// Look up a flight by callsign.
    pub fn get(&self, id: &str) -> Option<&FlightRecord> {
        self.flights.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.flights.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlightRecord> {
        self.flights.values()
    }

    pub(crate) fn into_map(self) -> HashMap<String, FlightRecord> {
        self.flights
    }
}

impl FromIterator<FlightRecord> for FlightSet {
    fn from_iter<I: IntoIterator<Item = FlightRecord>>(iter: I) -> Self {
        let mut set = Self::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}
