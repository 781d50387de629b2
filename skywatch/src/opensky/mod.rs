//! OpenSky Network REST client.
//!
//! # Architecture
//!
//! ```text
//! StateFetcher (poll loop)
//!     │
//!     └── StateSource trait ──► OpenSkyClient (reqwest blocking, basic auth)
//!                                   │
//!                                   ├── GET /api/states/all          → FlightSet
//!                                   └── GET /api/flights/{direction} → Vec<AirportFlight>
//! ```
//!
//! The [`StateSource`] trait is the seam the fetcher depends on, so tests can
//! drive the poll loop without a network.

pub(crate) mod client;
mod error;
mod states;
mod traffic;

pub use client::{
    Credentials, OpenSkyClient, StateSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS,
};
pub use error::FetchError;
pub use states::{decode_states, MIN_STATE_FIELDS};
pub use traffic::{decode_airport_flights, AirportFlight, TimeWindow, TrafficDirection};
