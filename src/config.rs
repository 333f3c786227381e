//! Configuration for API credentials and client tuning
//!
//! Settings are read from `config.json` in the XDG config directory
//! (`~/.config/apishowcase/` on Linux) or from an explicit path, then
//! overridden by `APISHOWCASE_*` environment variables.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::CacheConfig;

/// File name of the configuration file inside the config directory
const CONFIG_FILE_NAME: &str = "config.json";

/// NASA's shared, rate-limited demo key
const DEFAULT_NASA_API_KEY: &str = "DEMO_KEY";

/// GeoNames' shared demo account
const DEFAULT_GEONAMES_USERNAME: &str = "demo";

pub const ENV_WEATHERBIT_API_KEY: &str = "APISHOWCASE_WEATHERBIT_API_KEY";
pub const ENV_GIPHY_API_KEY: &str = "APISHOWCASE_GIPHY_API_KEY";
pub const ENV_NASA_API_KEY: &str = "APISHOWCASE_NASA_API_KEY";
pub const ENV_GEONAMES_USERNAME: &str = "APISHOWCASE_GEONAMES_USERNAME";

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for `Config`
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Weatherbit key; the weather page fails without one
    pub weatherbit_api_key: Option<String>,
    /// Giphy key; the giphy page fails without one
    pub giphy_api_key: Option<String>,
    /// NASA key for the astronomy picture of the day
    pub nasa_api_key: String,
    /// GeoNames account name
    pub geonames_username: String,
    /// Per-request HTTP timeout in seconds; no timeout when absent
    pub request_timeout_secs: Option<u64>,
    /// Cap on the number of cached responses; unbounded when absent
    pub cache_max_entries: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weatherbit_api_key: None,
            giphy_api_key: None,
            nasa_api_key: DEFAULT_NASA_API_KEY.to_string(),
            geonames_username: DEFAULT_GEONAMES_USERNAME.to_string(),
            request_timeout_secs: None,
            cache_max_entries: None,
        }
    }
}

impl Config {
    /// Returns the XDG-compliant location of the config file
    ///
    /// Returns `None` if no home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "apishowcase")?;
        Some(project_dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Reads settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads settings and applies environment overrides
    ///
    /// # Arguments
    /// * `path` - Explicit config file, which must exist. When `None`, the
    ///   default location is used if a file is present there.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Replaces settings with values found through `lookup`
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = lookup(ENV_WEATHERBIT_API_KEY) {
            self.weatherbit_api_key = Some(key);
        }
        if let Some(key) = lookup(ENV_GIPHY_API_KEY) {
            self.giphy_api_key = Some(key);
        }
        if let Some(key) = lookup(ENV_NASA_API_KEY) {
            self.nasa_api_key = key;
        }
        if let Some(username) = lookup(ENV_GEONAMES_USERNAME) {
            self.geonames_username = username;
        }
    }

    /// Cache settings derived from this configuration
    pub fn cache_config(&self) -> CacheConfig {
        match self.cache_max_entries {
            Some(max) => CacheConfig::bounded(max),
            None => CacheConfig::default(),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
