use std::path::{Path, PathBuf};

use thiserror::Error;
use unistate::StoreConfig;

use crate::paths;

const LOCAL_CONFIG_FILE: &str = ".unistate.toml";

/// Errors that can occur when loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config file {path}: {reason}")]
    Invalid { path: PathBuf, reason: &'static str },
}

/// Locate the config file
///
/// Searches in:
/// 1. `.unistate.toml` in the current working directory
/// 2. `config.toml` in the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_in(&cwd).or_else(|| paths::user_config_file().filter(|path| path.is_file()))
}

fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    let local = dir.join(LOCAL_CONFIG_FILE);
    local.is_file().then_some(local)
}

/// Load a store config from `path`
pub fn load_from(path: &Path) -> Result<StoreConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: StoreConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    // Depth 0 would reject even top-level dispatches
    if config.max_dispatch_depth == 0 {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            reason: "max_dispatch_depth must be at least 1",
        });
    }
    Ok(config)
}

/// Load the store config from the first config file found, or use defaults
pub fn load() -> StoreConfig {
    let Some(path) = find_config_file() else {
        log::debug!("No config file found, using default store config");
        return StoreConfig::default();
    };

    match load_from(&path) {
        Ok(config) => {
            log::info!("Loaded store config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("{}", e);
            StoreConfig::default()
        }
    }
}
