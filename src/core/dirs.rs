use crate::core::error::KotobatenError;
use std::path::PathBuf;

/// Overrides both the config and the data directory, mostly for tests and
/// portable installs.
pub const HOME_OVERRIDE_VAR: &str = "KOTOBATEN_HOME";

const APP_DIR: &str = "kotobaten";

fn home_override() -> Option<PathBuf> {
    std::env::var(HOME_OVERRIDE_VAR)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn get_config_directory() -> Result<PathBuf, KotobatenError> {
    if let Some(home) = home_override() {
        return Ok(home.join("config"));
    }

    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".config"))
                    .ok_or(KotobatenError::ConfigDirectoryNotFound)
            })?,
        "macos" => dirs::home_dir()
            .ok_or(KotobatenError::ConfigDirectoryNotFound)?
            .join("Library/Application Support"),
        _ => dirs::config_dir().ok_or(KotobatenError::ConfigDirectoryNotFound)?,
    };

    Ok(base.join(APP_DIR))
}

/// Directory holding the persistent key-value store.
pub fn get_data_directory() -> Result<PathBuf, KotobatenError> {
    if let Some(home) = home_override() {
        return Ok(home.join("data"));
    }

    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".local/share"))
                    .ok_or(KotobatenError::DataDirectoryNotFound)
            })?,
        "macos" => dirs::home_dir()
            .ok_or(KotobatenError::DataDirectoryNotFound)?
            .join("Library/Application Support"),
        _ => dirs::data_dir().ok_or(KotobatenError::DataDirectoryNotFound)?,
    };

    Ok(base.join(APP_DIR))
}
