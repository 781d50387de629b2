//! CLI runner for common setup.
//!
//! Loads the configuration file and initializes logging so command handlers
//! start from the same state.

use tracing::info;

use skywatch::config::ConfigFile;
use skywatch::logging::{init_logging, LoggingGuard};

use crate::error::CliError;

/// Runner that owns the loaded config and keeps logging alive.
pub struct CliRunner {
    _logging_guard: LoggingGuard,
    config: ConfigFile,
}

impl CliRunner {
    /// Load config and initialize logging.
    ///
    /// Stdout logging is disabled when stdout is a TTY, unless
    /// `force_stdout` is set, so log lines do not corrupt the dashboard.
    pub fn new(debug: bool, force_stdout: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let stdout_enabled = force_stdout || !atty::is(atty::Stream::Stdout);
        let logging_guard = init_logging(&config.logging.file, stdout_enabled, debug)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("Skywatch v{}", skywatch::VERSION);
        info!(command, log_file = %self.config.logging.file.display(), "CLI command starting");
    }
}
