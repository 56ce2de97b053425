//! Configuration for unistate stores
//!
//! This crate provides:
//! - Config and cache directory paths
//! - Discovery and loading of the store config file (TOML)

pub mod config_file;
pub mod paths;

pub use config_file::{find_config_file, load, load_from, ConfigError};
pub use paths::{cache_dir, config_dir, config_file_path, user_config_file};
