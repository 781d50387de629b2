//! Skywatch - live flight board backed by the OpenSky Network
//!
//! This library polls the OpenSky state vector API on a fixed interval,
//! merges the results with a static airport reference table, and exposes
//! the merged dataset through a [`store::SharedStore`] that an independently
//! scheduled consumer (the CLI dashboard) reads.
//!
//! # Architecture
//!
//! ```text
//! airports.json ──► ReferenceLoader ──┐ (once)
//!                                     ▼
//! OpenSky API ──► StateFetcher ──► SharedStore ◄── Render consumer
//!                 (poll loop)      (one mutex)     (reads, favorites)
//! ```

pub mod airports;
pub mod app;
pub mod config;
pub mod fetcher;
pub mod logging;
pub mod model;
pub mod opensky;
pub mod store;

/// Crate version, reported by the CLI banner and startup log.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
