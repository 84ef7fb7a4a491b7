//! Configuration for the `reach` CLI
//!
//! Read from a TOML file. Every section and key is optional, so an empty
//! file (or no file at all) yields the defaults below.
//!
//! ```toml
//! [log]
//! level = "info"          # trace | debug | info | warn | error
//! format = "console"      # console | json
//! output = "stderr"       # stdout | stderr | <path>
//!
//! [dashboard]
//! default_period = "30d"  # today | 7d | 30d
//! cache_capacity = 64
//! format = "table"        # table | json | csv
//! ```
//!
//! ```
//! use reach_config::{Config, OutputFormat};
//!
//! let config: Config = "[dashboard]\nformat = \"json\"".parse().unwrap();
//! assert_eq!(config.dashboard.format, OutputFormat::Json);
//! assert_eq!(config.dashboard.default_period, "30d");
//! ```

mod dashboard;
mod error;
mod logging;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use dashboard::{DashboardConfig, KNOWN_PERIODS, OutputFormat};
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel, LogOutput};

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[log]`
    pub log: LogConfig,

    /// `[dashboard]`
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Read, parse and validate a config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        contents.parse()
    }

    /// Config from an optional path; defaults when none is given
    ///
    /// A path that was given but cannot be read is an error, never a silent
    /// fallback to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        validation::validate_config(&config)?;
        Ok(config)
    }
}
