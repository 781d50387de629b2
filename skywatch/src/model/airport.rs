//! Airport reference records.

use std::collections::HashMap;

use serde::Serialize;

/// Static airport reference data, keyed by ICAO code.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AirportRecord {
    /// ICAO code, e.g. `"KSFO"`.
    pub icao: String,
    /// IATA code, e.g. `"SFO"`. May be empty.
    pub iata: String,
    pub name: String,
    pub city: String,
    /// State or region.
    pub region: String,
    pub country: String,
    /// Field elevation in feet.
    pub elevation: i32,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone name.
    pub timezone: String,
}

impl AirportRecord {
    /// One-line label used in search results: `SFO - San Francisco Intl (San Francisco, US)`.
    pub fn label(&self) -> String {
        format!(
            "{} - {} ({}, {})",
            self.iata, self.name, self.city, self.country
        )
    }
}

/// Airport records keyed by ICAO code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirportSet {
    airports: HashMap<String, AirportRecord>,
}

impl AirportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an airport under its ICAO code.
    ///
    /// Returns `false` and drops the record when the ICAO code is empty.
    pub fn insert(&mut self, record: AirportRecord) -> bool {
        if record.icao.is_empty() {
            return false;
        }
        self.airports.insert(record.icao.clone(), record);
        true
    }

    pub fn get(&self, icao: &str) -> Option<&AirportRecord> {
        self.airports.get(icao)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AirportRecord> {
        self.airports.values()
    }

    pub(crate) fn into_map(self) -> HashMap<String, AirportRecord> {
        self.airports
    }
}

impl FromIterator<AirportRecord> for AirportSet {
    fn from_iter<I: IntoIterator<Item = AirportRecord>>(iter: I) -> Self {
        let mut set = Self::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}
