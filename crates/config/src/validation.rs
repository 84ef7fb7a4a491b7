//! Checks serde cannot express on its own

use crate::Config;
use crate::dashboard::KNOWN_PERIODS;
use crate::error::{ConfigError, Result};
use crate::logging::LogOutput;

pub fn validate_config(config: &Config) -> Result<()> {
    validate_log(config)?;
    validate_dashboard(config)
}

fn validate_log(config: &Config) -> Result<()> {
    if let LogOutput::File(path) = &config.log.output
        && path.trim().is_empty()
    {
        return Err(ConfigError::invalid_value(
            "log",
            "output",
            "file path is empty",
        ));
    }
    Ok(())
}

fn validate_dashboard(config: &Config) -> Result<()> {
    let dashboard = &config.dashboard;

    let period = dashboard.default_period.trim().to_lowercase();
    if !KNOWN_PERIODS.contains(&period.as_str()) {
        return Err(ConfigError::invalid_value(
            "dashboard",
            "default_period",
            format!(
                "'{}' is not one of {}",
                dashboard.default_period,
                KNOWN_PERIODS.join(", ")
            ),
        ));
    }

    // the chart cache must hold at least one series
    if dashboard.cache_capacity == 0 {
        return Err(ConfigError::invalid_value(
            "dashboard",
            "cache_capacity",
            "must be at least 1",
        ));
    }

    Ok(())
}
