//! Blocking HTTP client for the OpenSky REST API.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use super::error::FetchError;
use super::states::decode_states;
use super::traffic::{decode_airport_flights, AirportFlight, TimeWindow, TrafficDirection};
use crate::model::FlightSet;

/// Default OpenSky API host.
pub const DEFAULT_BASE_URL: &str = "https://opensky-network.org";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const STATES_PATH: &str = "/api/states/all";

/// Source of full state vector snapshots.
///
/// Implemented by [`OpenSkyClient`]; tests substitute their own.
pub trait StateSource: Send + Sync {
    /// Fetch and decode the current set of flights.
    fn fetch_states(&self) -> Result<FlightSet, FetchError>;
}

/// OpenSky account credentials for HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build credentials only when both parts are present and non-blank.
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (username.map(str::trim), password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some(Self::new(user, pass))
            }
            _ => None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// OpenSky REST client using reqwest's blocking API.
#[derive(Debug)]
pub struct OpenSkyClient {
    http: Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl OpenSkyClient {
    /// Create a client for `base_url` with the given timeout.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Option<Credentials>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("skywatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: normalize_base_url(base_url.into()),
            credentials,
        })
    }

    /// Create an anonymous client against the public OpenSky host.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(
            DEFAULT_BASE_URL,
            None,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Point the client at a different host.
    ///
    /// Only possible while the client is still owned by the caller; once it
    /// has been handed to a running fetcher it can no longer be changed.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = normalize_base_url(base_url.into());
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Arrivals or departures at `icao` within `window`.
    ///
    /// OpenSky answers 404 when no flights match; that is returned as an
    /// empty list.
    pub fn fetch_airport_traffic(
        &self,
        direction: TrafficDirection,
        icao: &str,
        window: TimeWindow,
    ) -> Result<Vec<AirportFlight>, FetchError> {
        let path = format!("/api/flights/{}", direction.as_path());
        let query = [
            ("airport", icao.trim().to_uppercase()),
            ("begin", window.begin.to_string()),
            ("end", window.end.to_string()),
        ];

        match self.get(&path, &query) {
            Ok(body) => decode_airport_flights(&body),
            Err(FetchError::Status { status: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// GET `path` relative to the base URL and return the body.
    ///
    /// Query values are URL-encoded. Only `200 OK` counts as success.
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<u8>, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(ref credentials) = self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().map_err(|e| FetchError::Transport {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| FetchError::Transport {
                url,
                reason: format!("Failed to read response: {}", e),
            })
    }
}

impl StateSource for OpenSkyClient {
    fn fetch_states(&self) -> Result<FlightSet, FetchError> {
        let body = self.get(STATES_PATH, &[])?;
        decode_states(&body)
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Mock state source returning a scripted sequence of results.
    ///
    /// Once the script is exhausted it keeps returning the last entry.
    pub struct MockStateSource {
        script: Mutex<Vec<Result<FlightSet, FetchError>>>,
    }

    impl MockStateSource {
        pub fn new(mut script: Vec<Result<FlightSet, FetchError>>) -> Self {
            script.reverse();
            Self {
                script: Mutex::new(script),
            }
        }
    }

    impl StateSource for MockStateSource {
        fn fetch_states(&self) -> Result<FlightSet, FetchError> {
            let mut script = self.script.lock();
            if script.len() > 1 {
                script.pop().unwrap()
            } else {
                script
                    .last()
                    .cloned()
                    .unwrap_or_else(|| Ok(FlightSet::new()))
            }
        }
    }

    #[test]
    fn test_credentials_require_both_parts() {
        assert!(Credentials::from_parts(Some("pilot"), Some("secret")).is_some());
        assert!(Credentials::from_parts(Some("pilot"), None).is_none());
        assert!(Credentials::from_parts(Some("  "), Some("secret")).is_none());
        assert!(Credentials::from_parts(Some("pilot"), Some("")).is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("pilot", "hunter2");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("pilot"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_base_url_normalized() {
        let mut client = OpenSkyClient::with_defaults().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);

        client.set_base_url("http://localhost:8080/ ");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        let client =
            OpenSkyClient::new("http://127.0.0.1:1", None, Duration::from_secs(2)).unwrap();
        let result = client.fetch_states();
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }

    #[test]
    fn test_mock_replays_script_then_repeats_last() {
        let mut set = FlightSet::new();
        set.insert(crate::model::FlightRecord {
            id: "DAL1".to_string(),
            ..Default::default()
        });
        let mock = MockStateSource::new(vec![
            Ok(set),
            Err(FetchError::Decode("bad".to_string())),
        ]);

        assert_eq!(mock.fetch_states().unwrap().len(), 1);
        assert!(mock.fetch_states().is_err());
        assert!(mock.fetch_states().is_err());
    }
}
