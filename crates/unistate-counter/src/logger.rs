//! File-based logging using simplelog
//!
//! Log file location depends on build type:
//! - Debug builds: current working directory (for development convenience)
//! - Release builds: cache directory (~/.cache/unistate/ on Linux)
//!
//! stdout belongs to the counter output, so nothing is logged to the terminal.
//!
//! The level comes from `UNISTATE_LOG`, then `RUST_LOG`. Unset or unrecognized
//! values fall back to `debug` in debug builds and `info` in release builds.

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

/// Get the log file path based on build type
fn log_file_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let filename = format!("unistate-counter-{}.log", timestamp);

    if cfg!(debug_assertions) {
        PathBuf::from(filename)
    } else {
        unistate_config::cache_dir()
            .map(|dir| dir.join(&filename))
            .unwrap_or_else(|_| PathBuf::from(filename))
    }
}

fn level_from_env() -> LevelFilter {
    let app = std::env::var("UNISTATE_LOG").ok();
    let rust = std::env::var("RUST_LOG").ok();
    resolve_level(app.as_deref(), rust.as_deref(), cfg!(debug_assertions))
}

fn resolve_level(app: Option<&str>, rust: Option<&str>, debug_build: bool) -> LevelFilter {
    [app, rust]
        .into_iter()
        .flatten()
        .find_map(|value| value.trim().parse().ok())
        .unwrap_or(if debug_build {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
}

/// Initialize file-based logging
///
/// Returns the path of the log file.
pub fn init() -> Result<PathBuf> {
    let log_file = log_file_path();

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    WriteLogger::init(level_from_env(), config, file).context("Failed to initialize logger")?;

    Ok(log_file)
}
