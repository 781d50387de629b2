//! Application bootstrap and lifecycle management.
//!
//! [`SkywatchApp`] wires the shared store to its two producers and hands
//! the store to whatever renders it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       SkywatchApp                        │
//! │                                                          │
//! │  1. SharedStore (Arc) ◄──────────────┬──────────────┐    │
//! │                                      │              │    │
//! │  2. "airport-loader" thread ─────────┘              │    │
//! │        └── load airports, publish once              │    │
//! │                                                     │    │
//! │  3. "state-fetcher" thread ─────────────────────────┘    │
//! │        └── joins loader, then polls every interval       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use skywatch::app::{AppConfig, SkywatchApp};
//! use skywatch::config::ConfigFile;
//!
//! let config = AppConfig::from_config_file(&ConfigFile::load()?);
//! let app = SkywatchApp::start(config)?;
//!
//! let store = app.store();
//! // ... render from store
//!
//! app.shutdown();
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::SkywatchApp;
pub use config::AppConfig;
pub use error::AppError;
