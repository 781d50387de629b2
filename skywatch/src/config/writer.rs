//! INI serialization: `ConfigFile` → commented INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to the commented INI text written to `config.ini`.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let username = config.opensky.username.as_deref().unwrap_or("");
    let password = config.opensky.password.as_deref().unwrap_or("");

    format!(
        r#"[opensky]
; OpenSky Network API endpoint
base_url = {}
; Account credentials (optional; anonymous access has lower rate limits).
; SKYWATCH_OPENSKY_USERNAME / SKYWATCH_OPENSKY_PASSWORD override these.
username = {}
password = {}
; Request timeout in seconds
timeout = {}

[fetch]
; Seconds between flight state refreshes
poll_interval = {}

[airports]
; Airport reference table (JSON object or array of airport records)
file = {}

[logging]
file = {}

[ui]
; Dashboard redraw interval in milliseconds
refresh_ms = {}
"#,
        config.opensky.base_url,
        username,
        password,
        config.opensky.timeout,
        config.fetch.poll_interval,
        path_to_string(&config.airports.file),
        path_to_string(&config.logging.file),
        config.ui.refresh_ms,
    )
}

/// Render a path, collapsing the home directory back to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
