//! Airport arrivals and departures from `/api/flights/{arrival|departure}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::FetchError;

/// Which side of the airport to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficDirection {
    Arrival,
    Departure,
}

impl TrafficDirection {
    pub fn as_path(&self) -> &'static str {
        match self {
            TrafficDirection::Arrival => "arrival",
            TrafficDirection::Departure => "departure",
        }
    }
}

impl std::fmt::Display for TrafficDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrafficDirection::Arrival => write!(f, "Arrivals"),
            TrafficDirection::Departure => write!(f, "Departures"),
        }
    }
}

/// Query interval in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub begin: i64,
    pub end: i64,
}

impl TimeWindow {
    /// Length of the rolling window used for airport traffic.
    pub const DAY_SECS: i64 = 24 * 60 * 60;

    /// The 24 hours ending at `now`.
    pub fn last_day(now: DateTime<Utc>) -> Self {
        let end = now.timestamp();
        Self {
            begin: end - Self::DAY_SECS,
            end,
        }
    }

    /// The 24 hours ending at the current wall-clock time.
    pub fn last_day_from_now() -> Self {
        Self::last_day(Utc::now())
    }
}

/// One flight record from the arrivals/departures endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportFlight {
    pub icao24: String,
    #[serde(default)]
    pub callsign: Option<String>,
    #[serde(default)]
    pub est_departure_airport: Option<String>,
    #[serde(default)]
    pub est_arrival_airport: Option<String>,
    #[serde(default)]
    pub first_seen: Option<i64>,
    #[serde(default)]
    pub last_seen: Option<i64>,
}

impl AirportFlight {
    /// Trimmed callsign, or `"Unknown"`.
    pub fn callsign_or_unknown(&self) -> &str {
        self.callsign
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("Unknown")
    }

    /// The airport at the other end: origin for arrivals, destination for departures.
    pub fn counterpart(&self, direction: TrafficDirection) -> Option<&str> {
        let airport = match direction {
            TrafficDirection::Arrival => self.est_departure_airport.as_deref(),
            TrafficDirection::Departure => self.est_arrival_airport.as_deref(),
        };
        airport.filter(|a| !a.is_empty())
    }

    pub fn last_seen_utc(&self) -> Option<DateTime<Utc>> {
        self.last_seen
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}

/// Decode an arrivals/departures response body.
pub fn decode_airport_flights(body: &[u8]) -> Result<Vec<AirportFlight>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}
