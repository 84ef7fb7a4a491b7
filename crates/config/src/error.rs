//! Errors raised while loading `reach.toml`

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML, or a value has the wrong type
    #[error("invalid TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A value parsed but is outside what reach accepts
    #[error("[{section}].{field}: {message}")]
    InvalidValue {
        section: &'static str,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub fn invalid_value(
        section: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            section,
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_names_the_key() {
        let err = ConfigError::invalid_value("dashboard", "default_period", "'90d' is not a period");
        assert_eq!(
            err.to_string(),
            "[dashboard].default_period: '90d' is not a period"
        );
    }

    #[test]
    fn test_io_error_names_the_file() {
        let err = ConfigError::IoError {
            path: "reach.toml".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "cannot read 'reach.toml': not found");
    }
}
