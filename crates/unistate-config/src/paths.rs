//! Configuration and data directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/unistate/`, `~/.cache/unistate/`
//! - macOS: `~/Library/Application Support/unistate/`, `~/Library/Caches/unistate/`
//! - Windows: `%APPDATA%\unistate\`, `%LOCALAPPDATA%\unistate\`

use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) const APP_NAME: &str = "unistate";
const CONFIG_FILE: &str = "config.toml";

/// Get the application config directory, creating it if needed
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
    Ok(dir)
}

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
    Ok(dir)
}

/// Get path to the per-user config file, creating its directory if needed
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Where the per-user config file would be, without touching the file system
pub fn user_config_file() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_path() {
        // Environments without a home directory have no config dir to test against
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with("config.toml"));
            assert!(path.parent().is_some_and(|dir| dir.ends_with(APP_NAME)));
        }
    }

    #[test]
    fn test_user_config_file_matches_config_file_path() {
        let Some(path) = user_config_file() else {
            return;
        };
        assert!(path.ends_with("unistate/config.toml"));
        if let Ok(created) = config_file_path() {
            assert_eq!(created, path);
        }
    }

    #[test]
    fn test_cache_dir_exists() {
        if let Ok(dir) = cache_dir() {
            assert!(dir.exists());
            assert!(dir.ends_with(APP_NAME));
        }
    }
}
