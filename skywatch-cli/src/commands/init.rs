//! Init command - write the default configuration file.

use std::path::Path;

use skywatch::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
pub fn run(force: bool) -> Result<(), CliError> {
    let path = config_file_path();
    let written = write_default(&path, force)?;

    if written {
        println!("Configuration file: {}", path.display());
        println!();
        println!("Edit this file to set OpenSky credentials and the airport table.");
        println!("CLI arguments override config file values when specified.");
    } else {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to overwrite it with the defaults.");
    }
    Ok(())
}

/// Write the default config to `path` unless it exists and `force` is off.
///
/// Returns whether the file was written.
fn write_default(path: &Path, force: bool) -> Result<bool, CliError> {
    if path.exists() && !force {
        return Ok(false);
    }
    ConfigFile::default().save_to(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_default_respects_existing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");

        assert!(write_default(&path, false).unwrap());
        std::fs::write(&path, "[fetch]\npoll_interval = 5\n").unwrap();

        assert!(!write_default(&path, false).unwrap());
        assert_eq!(ConfigFile::load_from(&path).unwrap().fetch.poll_interval, 5);

        assert!(write_default(&path, true).unwrap());
        assert_eq!(ConfigFile::load_from(&path).unwrap().fetch.poll_interval, 60);
    }
}
