//! Record types held by the shared store.
//!
//! [`FlightSet`] and [`AirportSet`] are the only way to hand a full
//! replacement to the store. Both key every record by its own identity and
//! refuse records whose identity is empty, so a record present in the store
//! always satisfies `map key == record identity && !identity.is_empty()`.

mod airport;
mod flight;

pub use airport::{AirportRecord, AirportSet};
pub use flight::{FlightRecord, FlightSet};
