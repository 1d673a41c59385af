//! Runtime configuration.
//!
//! Bounds that were plain constants in early versions (poll interval, tracked
//! file table size, watcher cap) are configurable, layered as: defaults, then
//! `config.toml` in the platform data directory, then `LEXI_*` environment
//! variables. CLI flags are applied on top by `main`.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default seconds between directory poll cycles.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default capacity of a watcher's tracked-file table.
pub const DEFAULT_MAX_TRACKED_FILES: usize = 100;

/// Default cap on concurrently running directory watchers.
pub const DEFAULT_MAX_WATCHERS: usize = 100;

const APP_NAME: &str = "lexi";

/// Configuration file format (TOML).
/// Located at `<platform data dir>/lexi/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Watcher-related configuration
    #[serde(default)]
    pub watcher: WatcherConfigFile,
}

/// Watcher section of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatcherConfigFile {
    /// Seconds between poll cycles
    pub poll_interval_secs: Option<u64>,
    /// Tracked-file table capacity per watcher
    pub max_tracked_files: Option<usize>,
    /// Cap on concurrently running watchers
    pub max_watchers: Option<usize>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seconds between directory poll cycles
    pub poll_interval_secs: u64,
    /// Capacity of each watcher's tracked-file table
    pub max_tracked_files: usize,
    /// Cap on concurrently running watchers
    pub max_watchers: usize,
    /// Colorize console output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            max_tracked_files: DEFAULT_MAX_TRACKED_FILES,
            max_watchers: DEFAULT_MAX_WATCHERS,
            color: true,
        }
    }
}

impl Config {
    /// Duration between poll cycles
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Load config from file in the app data directory.
    /// Returns None if the file doesn't exist or can't be parsed.
    fn load_from_file() -> Option<ConfigFile> {
        let config_path = dirs::data_local_dir()?
            .join(APP_NAME)
            .join("config.toml");

        if !config_path.exists() {
            return None;
        }

        let content = fs::read_to_string(&config_path).ok()?;
        toml::from_str(&content).ok()
    }

    /// Load config with priority: environment variables > config file > defaults
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(file_config) = Self::load_from_file() {
            if let Some(v) = file_config.watcher.poll_interval_secs {
                config.poll_interval_secs = v;
            }
            if let Some(v) = file_config.watcher.max_tracked_files {
                config.max_tracked_files = v;
            }
            if let Some(v) = file_config.watcher.max_watchers {
                config.max_watchers = v;
            }
        }

        if let Ok(val) = std::env::var("LEXI_POLL_SECS") {
            if let Ok(secs) = val.parse() {
                config.poll_interval_secs = secs;
            }
        }

        if let Ok(val) = std::env::var("LEXI_MAX_FILES") {
            if let Ok(count) = val.parse() {
                config.max_tracked_files = count;
            }
        }

        if let Ok(val) = std::env::var("LEXI_MAX_WATCHERS") {
            if let Ok(count) = val.parse() {
                config.max_watchers = count;
            }
        }

        config
    }
}
