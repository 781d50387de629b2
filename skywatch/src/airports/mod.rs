//! Airport reference table: one-shot loader and search.
//!
//! The reference table is a JSON file of airport objects, keyed by any
//! string or laid out as an array:
//!
//! ```json
//! {
//!   "KSFO": { "icao": "KSFO", "iata": "SFO", "name": "San Francisco International Airport",
//!             "city": "San Francisco", "state": "California", "country": "US",
//!             "elevation": 13, "lat": 37.6189, "lon": -122.375, "tz": "America/Los_Angeles" }
//! }
//! ```
//!
//! Entries without an `icao` string are dropped silently.

mod loader;
mod search;

pub use loader::{load_airports, parse_airports, AirportLoadError, ReferenceLoader};
pub use search::search_airports;
