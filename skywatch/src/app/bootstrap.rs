//! Application bootstrap implementation.

use std::sync::Arc;

use tracing::info;

use super::config::AppConfig;
use super::error::AppError;
use crate::airports::ReferenceLoader;
use crate::fetcher::{FetchMetrics, FetcherHandle, StateFetcher};
use crate::opensky::{OpenSkyClient, StateSource};
use crate::store::SharedStore;

/// Running application: the shared store plus its producer threads.
///
/// Startup order:
/// 1. Create the store
/// 2. Spawn the airport loader (if a file is configured)
/// 3. Spawn the state fetcher, which joins the loader before its first cycle
///
/// Dropping the app requests exit without waiting; call
/// [`shutdown`](Self::shutdown) to also join the threads.
pub struct SkywatchApp {
    store: Arc<SharedStore>,
    metrics: Arc<FetchMetrics>,
    fetcher: Option<FetcherHandle>,
}

impl SkywatchApp {
    /// Start against the OpenSky API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or a thread
    /// cannot be spawned.
    pub fn start(config: AppConfig) -> Result<Self, AppError> {
        let client = OpenSkyClient::new(
            config.base_url.as_str(),
            config.credentials.clone(),
            config.request_timeout,
        )?;

        info!(
            base_url = client.base_url(),
            authenticated = client.has_credentials(),
            "OpenSky client ready"
        );

        Self::with_source(client, config)
    }

    /// Start with an arbitrary state source.
    ///
    /// `config.base_url`, credentials and timeout are ignored; the source
    /// already embodies them.
    pub fn with_source<S>(source: S, config: AppConfig) -> Result<Self, AppError>
    where
        S: StateSource + 'static,
    {
        let store = Arc::new(SharedStore::new());

        let mut fetcher = StateFetcher::new(source, Arc::clone(&store), config.fetcher.clone());

        if let Some(path) = config.airports_file.clone() {
            let loader = ReferenceLoader::spawn(Arc::clone(&store), path).map_err(|source| {
                AppError::ThreadSpawn {
                    thread: "airport-loader",
                    source,
                }
            })?;
            fetcher = fetcher.after_loader(loader);
        } else {
            info!("No airport table configured");
        }

        let metrics = fetcher.metrics();
        let handle = fetcher.spawn().map_err(|source| AppError::ThreadSpawn {
            thread: "state-fetcher",
            source,
        })?;

        info!(
            poll_interval_secs = config.fetcher.poll_interval.as_secs(),
            "Skywatch started"
        );

        Ok(Self {
            store,
            metrics,
            fetcher: Some(handle),
        })
    }

    /// Handle to the shared store.
    pub fn store(&self) -> Arc<SharedStore> {
        Arc::clone(&self.store)
    }

    /// Fetch cycle counters.
    pub fn metrics(&self) -> Arc<FetchMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Request exit and wait for the producer threads to stop.
    ///
    /// Waits at most for one in-flight request (bounded by the request
    /// timeout). Returns `false` if a thread panicked.
    pub fn shutdown(mut self) -> bool {
        info!("Shutting down");
        self.store.request_exit();

        let clean = match self.fetcher.take() {
            Some(handle) => handle.join(),
            None => true,
        };

        info!(clean, "Shutdown complete");
        clean
    }
}

impl Drop for SkywatchApp {
    fn drop(&mut self) {
        if self.fetcher.is_some() {
            self.store.request_exit();
        }
    }
}
