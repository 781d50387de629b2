//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and exit codes.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process;

use skywatch::airports::AirportLoadError;
use skywatch::app::AppError;
use skywatch::config::{config_file_path, ConfigFileError};
use skywatch::opensky::FetchError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Configuration file could not be read or written
    ConfigFile(ConfigFileError),
    /// Application failed to start
    Startup(AppError),
    /// Airport table could not be loaded
    Airports { path: PathBuf, error: AirportLoadError },
    /// OpenSky request failed
    Fetch(FetchError),
    /// Terminal setup or drawing failed
    Terminal(io::Error),
}

impl CliError {
    /// Exit the process with an error message and code 1.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::ConfigFile(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Check {}", config_file_path().display());
                eprintln!("or run 'skywatch init --force' to restore the defaults.");
            }
            CliError::Airports { .. } => {
                eprintln!();
                eprintln!("Set [airports] file in config.ini or pass --airports PATH.");
            }
            CliError::Fetch(FetchError::Status { status: 401, .. })
            | CliError::Fetch(FetchError::Status { status: 403, .. }) => {
                eprintln!();
                eprintln!("OpenSky rejected the credentials. Check [opensky] username/password");
                eprintln!("or the SKYWATCH_OPENSKY_USERNAME / SKYWATCH_OPENSKY_PASSWORD variables.");
            }
            CliError::Fetch(FetchError::Status { status: 429, .. }) => {
                eprintln!();
                eprintln!("Rate limited by OpenSky. Anonymous access allows fewer requests;");
                eprintln!("configure credentials or wait before retrying.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Startup(e) => write!(f, "{}", e),
            CliError::Airports { path, error } => {
                write!(f, "Failed to load airports from '{}': {}", path.display(), error)
            }
            CliError::Fetch(e) => write!(f, "OpenSky request failed: {}", e),
            CliError::Terminal(e) => write!(f, "Terminal error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Startup(e) => Some(e),
            CliError::Airports { error, .. } => Some(error),
            CliError::Fetch(e) => Some(e),
            CliError::Terminal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        CliError::Startup(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Fetch(e)
    }
}
