//! Configuration file handling for `~/.skywatch/config.ini`.
//!
//! Settings structs live in [`settings`], INI parsing in `parser`, and
//! serialization in `writer`. [`ConfigFile::load`] returns defaults when the
//! file is absent, so a fresh install works without running `skywatch init`.
//!
//! # Example
//!
//! ```
//! use skywatch::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.fetch.poll_interval, 60);
//! assert!(config.credentials().is_none());
//! ```

mod file;
mod parser;
mod settings;
mod writer;

pub use file::{
    config_directory, config_file_path, ConfigFileError, ENV_OPENSKY_PASSWORD,
    ENV_OPENSKY_USERNAME,
};
pub use settings::{
    AirportSettings, ConfigFile, FetchSettings, LoggingSettings, OpenSkySettings, UiSettings,
    DEFAULT_REFRESH_MS,
};
