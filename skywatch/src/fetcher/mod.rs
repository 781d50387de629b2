//! Remote state fetcher - the background poll loop.
//!
//! Each fetch cycle is `request → decode → atomic replace`. The decode
//! target is a private [`FlightSet`](crate::model::FlightSet) that the store
//! swaps in whole, so the store mutex is held only for the swap and never
//! across network I/O.
//!
//! Between cycles the fetcher waits on the store's wakeup signal, so exit
//! and on-demand refresh requests end the wait immediately.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use skywatch::fetcher::{FetcherConfig, StateFetcher};
//! use skywatch::opensky::OpenSkyClient;
//! use skywatch::store::SharedStore;
//!
//! let store = Arc::new(SharedStore::new());
//! let client = OpenSkyClient::with_defaults()?;
//! let handle = StateFetcher::new(client, Arc::clone(&store), FetcherConfig::default()).spawn()?;
//!
//! // ... later
//! store.request_exit();
//! handle.join();
//! ```

mod config;
mod daemon;
mod metrics;

pub use config::{FetcherConfig, DEFAULT_POLL_INTERVAL_SECS};
pub use daemon::{CycleOutcome, FetcherHandle, StateFetcher};
pub use metrics::{FetchMetrics, FetchMetricsSnapshot};
