//! Settings structs for each configuration section.
//!
//! Each struct represents one `[section]` of the INI file. These are plain
//! data types; parsing and serialization live elsewhere.

use std::path::PathBuf;
use std::time::Duration;

use super::file::config_directory;
use crate::fetcher::DEFAULT_POLL_INTERVAL_SECS;
use crate::opensky::{Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Default dashboard redraw interval in milliseconds.
pub const DEFAULT_REFRESH_MS: u64 = 250;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub opensky: OpenSkySettings,
    pub fetch: FetchSettings,
    pub airports: AirportSettings,
    pub logging: LoggingSettings,
    pub ui: UiSettings,
}

/// `[opensky]` section.
#[derive(Clone, PartialEq)]
pub struct OpenSkySettings {
    /// Scheme and host of the API, without a trailing slash.
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Request timeout in seconds.
    pub timeout: u64,
}

// Manual impl keeps the password out of debug logs.
impl std::fmt::Debug for OpenSkySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenSkySettings")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// `[fetch]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    /// Seconds between fetch cycles.
    pub poll_interval: u64,
}

/// `[airports]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportSettings {
    /// Airport reference table (JSON).
    pub file: PathBuf,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub file: PathBuf,
}

/// `[ui]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct UiSettings {
    /// Dashboard redraw interval in milliseconds.
    pub refresh_ms: u64,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let dir = config_directory();
        Self {
            opensky: OpenSkySettings {
                base_url: DEFAULT_BASE_URL.to_string(),
                username: None,
                password: None,
                timeout: DEFAULT_TIMEOUT_SECS,
            },
            fetch: FetchSettings {
                poll_interval: DEFAULT_POLL_INTERVAL_SECS,
            },
            airports: AirportSettings {
                file: dir.join("airports.json"),
            },
            logging: LoggingSettings {
                file: dir.join("skywatch.log"),
            },
            ui: UiSettings {
                refresh_ms: DEFAULT_REFRESH_MS,
            },
        }
    }
}

impl ConfigFile {
    /// API credentials, if both username and password are set.
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(
            self.opensky.username.as_deref(),
            self.opensky.password.as_deref(),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.opensky.timeout)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.fetch.poll_interval)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.ui.refresh_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();

        assert_eq!(config.opensky.base_url, "https://opensky-network.org");
        assert_eq!(config.opensky.timeout, 30);
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert_eq!(config.refresh_interval(), Duration::from_millis(250));
        assert!(config.airports.file.ends_with("airports.json"));
        assert!(config.logging.file.ends_with("skywatch.log"));
    }

    #[test]
    fn test_credentials_require_both_parts() {
        let mut config = ConfigFile::default();
        config.opensky.username = Some("pilot".to_string());
        assert!(config.credentials().is_none());

        config.opensky.password = Some("hunter2".to_string());
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.username(), "pilot");
    }

    #[test]
    fn test_debug_hides_password() {
        let mut config = ConfigFile::default();
        config.opensky.password = Some("hunter2".to_string());

        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
    }
}
