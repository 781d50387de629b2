//! Error types for OpenSky requests.

use thiserror::Error;

/// Errors that can occur while fetching from the OpenSky API.
///
/// None of these are fatal to the poll loop; each one skips a single cycle.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// Connection, timeout or body read failure.
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The body was not the expected JSON shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Short classification for logs and status lines.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Client(_) => "client",
            FetchError::Transport { .. } => "transport",
            FetchError::Status { .. } => "protocol",
            FetchError::Decode(_) => "decode",
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = FetchError::Status {
            status: 503,
            url: "https://opensky-network.org/api/states/all".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 503 from https://opensky-network.org/api/states/all"
        );
        assert_eq!(err.kind(), "protocol");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FetchError = json_err.into();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
