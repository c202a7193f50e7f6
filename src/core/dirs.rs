use crate::core::error::PushyError;
use std::path::PathBuf;

pub fn get_config_directory() -> Result<PathBuf, PushyError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".config"))
                    .ok_or(PushyError::ConfigDirectoryNotFound)
            })?,
        "macos" => dirs::home_dir()
            .ok_or(PushyError::ConfigDirectoryNotFound)?
            .join("Library/Application Support"),
        _ => dirs::config_dir().ok_or(PushyError::ConfigDirectoryNotFound)?,
    };

    Ok(base.join("pushy"))
}

pub fn get_config_file() -> Result<PathBuf, PushyError> {
    Ok(get_config_directory()?.join("config.json"))
}
