//! Application configuration for `SkywatchApp`.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ConfigFile;
use crate::fetcher::FetcherConfig;
use crate::opensky::{Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Top-level configuration passed to [`SkywatchApp::start`](super::SkywatchApp::start).
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Airport table to load at startup. `None` skips the loader.
    pub airports_file: Option<PathBuf>,

    /// OpenSky API base URL.
    pub base_url: String,

    /// Basic-auth credentials; anonymous when `None`.
    pub credentials: Option<Credentials>,

    /// Per-request timeout.
    pub request_timeout: Duration,

    /// Poll loop settings.
    pub fetcher: FetcherConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            airports_file: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            fetcher: FetcherConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build from the loaded configuration file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            airports_file: Some(config.airports.file.clone()),
            base_url: config.opensky.base_url.clone(),
            credentials: config.credentials(),
            request_timeout: config.request_timeout(),
            fetcher: FetcherConfig::new().with_poll_interval(config.poll_interval()),
        }
    }

    pub fn with_airports_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.airports_file = Some(path.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.fetcher.poll_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_file() {
        let mut file = ConfigFile::default();
        file.opensky.base_url = "http://localhost:9000".to_string();
        file.opensky.username = Some("pilot".to_string());
        file.opensky.password = Some("hunter2".to_string());
        file.fetch.poll_interval = 20;

        let config = AppConfig::from_config_file(&file);

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.credentials.unwrap().username(), "pilot");
        assert_eq!(config.fetcher.poll_interval, Duration::from_secs(20));
        assert_eq!(config.airports_file, Some(file.airports.file.clone()));
    }

    #[test]
    fn test_builder_overrides() {
        let config = AppConfig::default()
            .with_airports_file("/data/airports.json")
            .with_base_url("http://127.0.0.1:8080")
            .with_poll_interval(Duration::from_secs(5));

        assert_eq!(
            config.airports_file,
            Some(PathBuf::from("/data/airports.json"))
        );
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.fetcher.poll_interval, Duration::from_secs(5));
        assert!(config.credentials.is_none());
    }
}
