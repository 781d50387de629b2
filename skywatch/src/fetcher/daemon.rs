//! State fetcher - poll loop daemon for live flight states.
//!
//! [`StateFetcher`] owns its [`StateSource`], so the endpoint it talks to is
//! fixed once the fetcher is built. `new()` + `spawn()` moves it onto a named
//! thread; [`FetcherHandle::join`] waits for the loop to observe the exit
//! request.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::config::FetcherConfig;
use super::metrics::FetchMetrics;
use crate::airports::AirportLoadError;
use crate::opensky::{FetchError, StateSource};
use crate::store::{SharedStore, WakeReason};

/// Thread name used for the fetch loop.
const THREAD_NAME: &str = "state-fetcher";

/// Result of one fetch cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// A new flight set was published.
    Published {
        /// Store publish counter after the swap.
        cycle: u64,
        /// Number of flights in the new set.
        flights: usize,
    },
    /// The cycle failed; the previous flight set is still published.
    Skipped(FetchError),
}

impl CycleOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, CycleOutcome::Published { .. })
    }
}

/// Poll loop that refreshes the store's flight set.
pub struct StateFetcher<S: StateSource> {
    source: S,
    store: Arc<SharedStore>,
    config: FetcherConfig,
    metrics: Arc<FetchMetrics>,
    loader: Option<JoinHandle<Result<usize, AirportLoadError>>>,
}

impl<S: StateSource + 'static> StateFetcher<S> {
    /// Create a new fetcher publishing into `store`.
    pub fn new(source: S, store: Arc<SharedStore>, config: FetcherConfig) -> Self {
        Self {
            source,
            store,
            config,
            metrics: Arc::new(FetchMetrics::new()),
            loader: None,
        }
    }

    /// Wait for the airport loader to finish before the first cycle.
    pub fn after_loader(mut self, loader: JoinHandle<Result<usize, AirportLoadError>>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Shared counters for this fetcher.
    pub fn metrics(&self) -> Arc<FetchMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run a single fetch cycle.
    ///
    /// On failure the store is left untouched and the error is logged with
    /// its category.
    pub fn run_cycle(&self) -> CycleOutcome {
        match self.source.fetch_states() {
            Ok(flights) => {
                let count = flights.len();
                let cycle = self.store.replace_flights(flights);
                self.metrics.record_published(count);
                tracing::info!(cycle, flights = count, "Published flight states");
                CycleOutcome::Published {
                    cycle,
                    flights: count,
                }
            }
            Err(e) => {
                self.metrics.record_skipped();
                let failures = self.metrics.snapshot().consecutive_failures;
                match &e {
                    FetchError::Status { status, url } => {
                        tracing::warn!(
                            status,
                            url = %url,
                            consecutive_failures = failures,
                            "Flight state request rejected"
                        );
                    }
                    FetchError::Decode(reason) => {
                        tracing::warn!(
                            reason = %reason,
                            consecutive_failures = failures,
                            "Failed to decode flight states"
                        );
                    }
                    other => {
                        tracing::warn!(
                            kind = other.kind(),
                            error = %other,
                            consecutive_failures = failures,
                            "Failed to fetch flight states"
                        );
                    }
                }
                CycleOutcome::Skipped(e)
            }
        }
    }

    /// Run the poll loop on the current thread until exit is requested.
    pub fn run(mut self) {
        if let Some(loader) = self.loader.take() {
            if loader.join().is_err() {
                tracing::error!("Airport loader thread panicked");
            }
        }

        tracing::info!(
            poll_interval_secs = self.config.poll_interval.as_secs(),
            "State fetcher started"
        );

        while !self.store.exit_requested() {
            self.run_cycle();

            match self.store.wait_for_next_cycle(self.config.poll_interval) {
                WakeReason::Exit => break,
                WakeReason::Refresh => tracing::debug!("Refresh requested"),
                WakeReason::Elapsed => {}
            }
        }

        tracing::info!("State fetcher stopped");
    }

    /// Spawn the poll loop on its own thread.
    pub fn spawn(self) -> io::Result<FetcherHandle> {
        let metrics = self.metrics();
        let handle = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || self.run())?;

        Ok(FetcherHandle { handle, metrics })
    }
}

/// Handle to a spawned fetcher thread.
pub struct FetcherHandle {
    handle: JoinHandle<()>,
    metrics: Arc<FetchMetrics>,
}

impl FetcherHandle {
    pub fn metrics(&self) -> Arc<FetchMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Wait for the fetch loop to stop.
    ///
    /// Returns `false` if the thread panicked.
    pub fn join(self) -> bool {
        match self.handle.join() {
            Ok(()) => true,
            Err(_) => {
                tracing::error!("State fetcher thread panicked");
                false
            }
        }
    }
}
