//! Common error types for Tern.

use crate::ColumnType;
use thiserror::Error;

/// Errors raised by the shared model: type names and canonical decoding.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Type name not recognised.
    #[error("Unknown column type: {0}")]
    UnknownColumnType(String),

    /// Bytes do not form a canonical encoding of the type.
    #[error("Invalid {ty} encoding: {reason}")]
    InvalidEncoding { ty: ColumnType, reason: String },
}

impl CoreError {
    pub fn invalid_encoding(ty: ColumnType, reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            ty,
            reason: reason.into(),
        }
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while loading or validating engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid time zone offset: {0}")]
    InvalidTimeZone(String),

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ConfigError {
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}
