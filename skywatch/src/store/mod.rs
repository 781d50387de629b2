//! Shared store - the single point of truth read by every consumer.
//!
//! # Access discipline
//!
//! One `parking_lot::Mutex` guards flights, airports and favorites. Every
//! operation takes it for exactly one logical step (a full replace, one
//! favorite insert or erase, one lookup) and never across I/O. Readers get
//! owned data back: either a cloned record or an `Arc` snapshot of a whole
//! mapping. Because replacement swaps the `Arc` wholesale, a snapshot is
//! always the complete result of exactly one publish.
//!
//! Lifecycle flags (data state, exit, refresh) are atomics and are read
//! without the mutex.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use skywatch::model::{FlightRecord, FlightSet};
//! use skywatch::store::SharedStore;
//!
//! let store = Arc::new(SharedStore::new());
//!
//! let mut flights = FlightSet::new();
//! flights.insert(FlightRecord { id: "DAL123".into(), ..Default::default() });
//! store.replace_flights(flights);
//!
//! store.add_favorite("DAL123");
//! assert!(store.is_data_ready());
//! assert_eq!(store.favorite_flights().len(), 1);
//! ```

mod lifecycle;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::airports::search_airports;
use crate::model::{AirportRecord, AirportSet, FlightRecord, FlightSet};

pub use lifecycle::{DataState, WakeReason};
use lifecycle::Lifecycle;

/// Flight mapping as published by one fetch cycle.
pub type FlightMap = HashMap<String, FlightRecord>;

/// Airport mapping as published by the reference loader.
pub type AirportMap = HashMap<String, AirportRecord>;

/// Point-in-time view of the flight mapping.
#[derive(Debug, Clone)]
pub struct FlightSnapshot {
    /// Number of publishes so far; 0 before the first fetch cycle.
    pub cycle: u64,
    /// When this mapping was published.
    pub updated_at: Option<Instant>,
    /// The published mapping.
    pub flights: Arc<FlightMap>,
}

impl FlightSnapshot {
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FlightRecord> {
        self.flights.get(id)
    }

    /// Flights ordered by callsign.
    pub fn sorted(&self) -> Vec<&FlightRecord> {
        let mut flights: Vec<_> = self.flights.values().collect();
        flights.sort_by(|a, b| a.id.cmp(&b.id));
        flights
    }

    /// Time since this mapping was published.
    pub fn age(&self) -> Option<Duration> {
        self.updated_at.map(|t| t.elapsed())
    }
}

#[derive(Debug, Default)]
struct StoreData {
    flights: Arc<FlightMap>,
    airports: Arc<AirportMap>,
    favorites: BTreeSet<String>,
    cycle: u64,
    updated_at: Option<Instant>,
}

/// Mutex-protected aggregate of flights, airports and favorites.
///
/// Create it once behind an `Arc` and hand clones of the `Arc` to the
/// loader, the fetcher and the consumer.
#[derive(Debug)]
pub struct SharedStore {
    data: Mutex<StoreData>,
    lifecycle: Lifecycle,
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedStore {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(StoreData::default()),
            lifecycle: Lifecycle::new(),
        }
    }

    // ─── Publishing ────────────────────────────────────────────────────────

    /// Replace the whole flight mapping and mark the data ready.
    ///
    /// Returns the new cycle number. The previous mapping is dropped after
    /// the lock is released.
    pub fn replace_flights(&self, flights: FlightSet) -> u64 {
        let replacement = Arc::new(flights.into_map());
        let (cycle, _previous) = {
            let mut data = self.data.lock();
            let previous = std::mem::replace(&mut data.flights, replacement);
            data.cycle += 1;
            data.updated_at = Some(Instant::now());
            self.lifecycle.advance(DataState::Ready);
            (data.cycle, previous)
        };
        cycle
    }

    /// Replace the whole airport mapping and mark the data ready.
    pub fn replace_airports(&self, airports: AirportSet) {
        let replacement = Arc::new(airports.into_map());
        let _previous = {
            let mut data = self.data.lock();
            let previous = std::mem::replace(&mut data.airports, replacement);
            self.lifecycle.advance(DataState::Ready);
            previous
        };
    }

    // ─── Flight reads ──────────────────────────────────────────────────────

    /// Snapshot of the current flight mapping.
    pub fn flights(&self) -> FlightSnapshot {
        let data = self.data.lock();
        FlightSnapshot {
            cycle: data.cycle,
            updated_at: data.updated_at,
            flights: Arc::clone(&data.flights),
        }
    }

    pub fn flight(&self, id: &str) -> Option<FlightRecord> {
        self.data.lock().flights.get(id).cloned()
    }

    pub fn flight_count(&self) -> usize {
        self.data.lock().flights.len()
    }

    /// Flights whose callsign contains `term`, case-insensitive, ordered by callsign.
    ///
    /// An empty or blank term matches nothing.
    pub fn search_flights(&self, term: &str) -> Vec<FlightRecord> {
        let needle = term.trim().to_uppercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let flights = self.flights();
        let mut matches: Vec<FlightRecord> = flights
            .flights
            .values()
            .filter(|f| f.id.to_uppercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        matches
    }

    // ─── Airport reads ─────────────────────────────────────────────────────

    pub fn airports(&self) -> Arc<AirportMap> {
        Arc::clone(&self.data.lock().airports)
    }

    pub fn airport(&self, icao: &str) -> Option<AirportRecord> {
        self.data.lock().airports.get(icao).cloned()
    }

    pub fn airport_count(&self) -> usize {
        self.data.lock().airports.len()
    }

    /// See [`search_airports`] for matching rules.
    pub fn search_airports(&self, term: &str) -> Vec<AirportRecord> {
        let airports = self.airports();
        search_airports(airports.values(), term)
    }

    // ─── Favorites ─────────────────────────────────────────────────────────

    /// Returns `true` if the id was not already a favorite.
    pub fn add_favorite(&self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        self.data.lock().favorites.insert(id.to_string())
    }

    /// Returns `true` if the id was a favorite.
    pub fn remove_favorite(&self, id: &str) -> bool {
        self.data.lock().favorites.remove(id)
    }

    /// Flip favorite membership. Returns the new membership.
    pub fn toggle_favorite(&self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        let mut data = self.data.lock();
        if data.favorites.remove(id) {
            false
        } else {
            data.favorites.insert(id.to_string());
            true
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.data.lock().favorites.contains(id)
    }

    /// All favorite ids, sorted, including ones absent from the current cycle.
    pub fn favorites(&self) -> Vec<String> {
        self.data.lock().favorites.iter().cloned().collect()
    }

    /// Favorites that are present in the current flight mapping.
    pub fn favorite_flights(&self) -> Vec<FlightRecord> {
        let data = self.data.lock();
        data.favorites
            .iter()
            .filter_map(|id| data.flights.get(id).cloned())
            .collect()
    }

    // ─── Lifecycle ─────────────────────────────────────────────────────────

    pub fn data_state(&self) -> DataState {
        self.lifecycle.state()
    }

    pub fn is_data_ready(&self) -> bool {
        self.lifecycle.state() == DataState::Ready
    }

    pub(crate) fn mark_loading(&self) {
        self.lifecycle.advance(DataState::Loading);
    }

    /// Ask every loop observing this store to stop.
    ///
    /// Returns `true` for the call that set the signal.
    pub fn request_exit(&self) -> bool {
        self.lifecycle.request_exit()
    }

    pub fn exit_requested(&self) -> bool {
        self.lifecycle.exit_requested()
    }

    /// Ask the fetcher to start its next cycle now instead of at the end of
    /// its interval.
    pub fn request_refresh(&self) {
        self.lifecycle.request_refresh();
    }

    pub fn refresh_pending(&self) -> bool {
        self.lifecycle.refresh_pending()
    }

    /// Inter-cycle wait for the fetcher. Consumes a pending refresh.
    pub(crate) fn wait_for_next_cycle(&self, interval: Duration) -> WakeReason {
        self.lifecycle.wait(interval, true)
    }

    /// Sleep up to `timeout`, returning early with `true` if exit is requested.
    pub fn wait_for_exit(&self, timeout: Duration) -> bool {
        self.lifecycle.wait(timeout, false) == WakeReason::Exit
    }
}
