//! Application error types.

use std::fmt;
use std::io;

use crate::opensky::FetchError;

/// Errors that can occur while starting the application.
#[derive(Debug)]
pub enum AppError {
    /// Failed to build the HTTP client.
    ClientCreation(FetchError),

    /// Failed to spawn a worker thread.
    ThreadSpawn {
        thread: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ClientCreation(e) => {
                write!(f, "Failed to create OpenSky client: {}", e)
            }
            AppError::ThreadSpawn { thread, source } => {
                write!(f, "Failed to spawn {} thread: {}", thread, source)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::ClientCreation(e) => Some(e),
            AppError::ThreadSpawn { source, .. } => Some(source),
        }
    }
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        AppError::ClientCreation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_app_error_display() {
        let err = AppError::ThreadSpawn {
            thread: "state-fetcher",
            source: io::Error::new(io::ErrorKind::Other, "no threads left"),
        };
        assert!(err.to_string().contains("state-fetcher"));
        assert!(err.to_string().contains("no threads left"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_app_error_from_fetch_error() {
        let err: AppError = FetchError::Client("tls backend unavailable".to_string()).into();
        assert!(matches!(err, AppError::ClientCreation(_)));
        assert!(err.to_string().contains("OpenSky client"));
    }
}
