//! Loading and saving `~/.skywatch/config.ini`.

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::ConfigFile;

/// Overrides `[opensky] username`.
pub const ENV_OPENSKY_USERNAME: &str = "SKYWATCH_OPENSKY_USERNAME";

/// Overrides `[opensky] password`.
pub const ENV_OPENSKY_PASSWORD: &str = "SKYWATCH_OPENSKY_PASSWORD";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from `~/.skywatch/config.ini`.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file yields defaults. Credential environment variables are
    /// applied on top in both cases.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        let mut config = if path.exists() {
            let ini = Ini::load_from_file_opt(path, super::parser::parse_options())?;
            super::parser::parse_ini(&ini)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay credential overrides from `lookup` (normally the environment).
    ///
    /// Blank values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(username) = value(ENV_OPENSKY_USERNAME) {
            self.opensky.username = Some(username.trim().to_string());
        }
        if let Some(password) = value(ENV_OPENSKY_PASSWORD) {
            self.opensky.password = Some(password);
        }
    }

    /// Save configuration to `~/.skywatch/config.ini`.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }
}

/// Path to the config directory (`~/.skywatch`).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".skywatch")
}

/// Path to the config file (`~/.skywatch/config.ini`).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_paths() {
        assert!(config_directory().ends_with(".skywatch"));
        assert!(config_file_path().ends_with(".skywatch/config.ini"));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp_dir.path().join("missing.ini")).unwrap();

        assert_eq!(config.fetch, ConfigFile::default().fetch);
        assert_eq!(config.opensky.base_url, ConfigFile::default().opensky.base_url);
    }

    #[test]
    fn test_save_creates_directory_and_loads_back() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.ui.refresh_ms = 500;
        config.save_to(&path).unwrap();

        assert!(path.exists());
        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded.ui.refresh_ms, 500);
    }

    #[test]
    fn test_credentials_with_backslash_and_quotes_round_trip() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");

        let mut config = ConfigFile::default();
        config.opensky.username = Some("back\\slash".to_string());
        config.opensky.password = Some("\"quoted\"".to_string());
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded.opensky.username.as_deref(), Some("back\\slash"));
        assert_eq!(loaded.opensky.password.as_deref(), Some("\"quoted\""));
    }

    #[test]
    fn test_load_reports_invalid_value() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        std::fs::write(&path, "[opensky]\ntimeout = -5\n").unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { .. }));
    }

    #[test]
    fn test_env_overrides_credentials() {
        let env: HashMap<&str, &str> = [
            (ENV_OPENSKY_USERNAME, " pilot "),
            (ENV_OPENSKY_PASSWORD, "s3cret"),
        ]
        .into_iter()
        .collect();

        let mut config = ConfigFile::default();
        config.opensky.username = Some("file-user".to_string());
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.opensky.username.as_deref(), Some("pilot"));
        assert_eq!(config.opensky.password.as_deref(), Some("s3cret"));
        assert!(config.credentials().is_some());
    }

    #[test]
    fn test_blank_env_does_not_clear_file_values() {
        let mut config = ConfigFile::default();
        config.opensky.username = Some("file-user".to_string());
        config.apply_env_overrides(|_| Some("  ".to_string()));

        assert_eq!(config.opensky.username.as_deref(), Some("file-user"));
        assert!(config.opensky.password.is_none());
    }
}
