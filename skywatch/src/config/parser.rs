//! INI parsing: `Ini` → `ConfigFile`.
//!
//! The single place where INI key names are mapped to struct fields.

use ini::{Ini, ParseOption};
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Options for reading `config.ini`.
///
/// Values are taken literally: the writer emits them unescaped and unquoted,
/// so `\` and `"` in credentials survive a save/load round trip.
pub(super) fn parse_options() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [opensky]
    if let Some(section) = ini.section(Some("opensky")) {
        if let Some(v) = section.get("base_url") {
            let v = v.trim();
            if !v.is_empty() {
                if !v.starts_with("http://") && !v.starts_with("https://") {
                    return Err(invalid(
                        "opensky",
                        "base_url",
                        v,
                        "must start with http:// or https://",
                    ));
                }
                config.opensky.base_url = v.trim_end_matches('/').to_string();
            }
        }
        config.opensky.username = non_empty(section.get("username"));
        config.opensky.password = non_empty(section.get("password"));
        if let Some(v) = section.get("timeout") {
            config.opensky.timeout = positive_int("opensky", "timeout", v)?;
        }
    }

    // [fetch]
    if let Some(section) = ini.section(Some("fetch")) {
        if let Some(v) = section.get("poll_interval") {
            config.fetch.poll_interval = positive_int("fetch", "poll_interval", v)?;
        }
    }

    // [airports]
    if let Some(section) = ini.section(Some("airports")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.airports.file = expand_tilde(v);
            }
        }
    }

    // [logging]
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    // [ui]
    if let Some(section) = ini.section(Some("ui")) {
        if let Some(v) = section.get("refresh_ms") {
            config.ui.refresh_ms = positive_int("ui", "refresh_ms", v)?;
        }
    }

    Ok(config)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn positive_int(section: &str, key: &str, value: &str) -> Result<u64, ConfigFileError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(section, key, value, "must be a positive integer")),
    }
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str_opt(text, parse_options()).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_ini_gives_defaults() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
[opensky]
base_url = http://localhost:8080/
username = pilot
password = hunter2
timeout = 10

[fetch]
poll_interval = 15

[airports]
file = /data/airports.json

[logging]
file = /tmp/skywatch.log

[ui]
refresh_ms = 100
"#,
        )
        .unwrap();

        assert_eq!(config.opensky.base_url, "http://localhost:8080");
        assert_eq!(config.opensky.username.as_deref(), Some("pilot"));
        assert_eq!(config.opensky.password.as_deref(), Some("hunter2"));
        assert_eq!(config.opensky.timeout, 10);
        assert_eq!(config.fetch.poll_interval, 15);
        assert_eq!(config.airports.file, PathBuf::from("/data/airports.json"));
        assert_eq!(config.logging.file, PathBuf::from("/tmp/skywatch.log"));
        assert_eq!(config.ui.refresh_ms, 100);
    }

    #[test]
    fn test_blank_credentials_are_none() {
        let config = parse("[opensky]\nusername =\npassword =   \n").unwrap();
        assert!(config.opensky.username.is_none());
        assert!(config.opensky.password.is_none());
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_invalid_poll_interval() {
        let err = parse("[fetch]\npoll_interval = soon\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::InvalidValue { ref section, ref key, .. }
                if section == "fetch" && key == "poll_interval"
        ));

        assert!(parse("[fetch]\npoll_interval = 0\n").is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        let err = parse("[opensky]\nbase_url = opensky-network.org\n").unwrap_err();
        assert!(err.to_string().contains("opensky.base_url"));
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x.json"), home.join("x.json"));
        }
    }
}
