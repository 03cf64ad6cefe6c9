//! Engine configuration.
//!
//! Loaded from TOML; every field has a default so an empty document is a
//! valid configuration.

use std::path::Path;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Largest TTL accepted by default: 20 years, in seconds.
pub const DEFAULT_MAX_TTL_SECS: u32 = 630_720_000;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum accepted TTL in seconds.
    #[serde(default = "default_max_ttl_secs")]
    pub max_ttl_secs: u32,

    /// Offset applied to timestamp literals that carry no zone, e.g. "+00:00".
    #[serde(default = "default_time_zone")]
    pub default_time_zone: String,

    /// Keyspaces that external requests may never address.
    #[serde(default = "default_reserved_keyspaces")]
    pub reserved_keyspaces: Vec<String>,
}

fn default_max_ttl_secs() -> u32 {
    DEFAULT_MAX_TTL_SECS
}

fn default_time_zone() -> String {
    "+00:00".to_string()
}

fn default_reserved_keyspaces() -> Vec<String> {
    [
        "system",
        "system_schema",
        "system_auth",
        "system_distributed",
        "system_traces",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_ttl_secs: default_max_ttl_secs(),
            default_time_zone: default_time_zone(),
            reserved_keyspaces: default_reserved_keyspaces(),
        }
    }
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from a TOML document and validates it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ttl_secs == 0 {
            return Err(ConfigError::invalid_value(
                "max_ttl_secs",
                "must be greater than zero",
            ));
        }
        if self.reserved_keyspaces.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::invalid_value(
                "reserved_keyspaces",
                "keyspace names must not be empty",
            ));
        }
        self.default_offset()?;
        Ok(())
    }

    /// The default zone as a fixed UTC offset.
    pub fn default_offset(&self) -> Result<FixedOffset, ConfigError> {
        parse_utc_offset(&self.default_time_zone)
            .ok_or_else(|| ConfigError::InvalidTimeZone(self.default_time_zone.clone()))
    }

    pub fn with_max_ttl_secs(mut self, max_ttl_secs: u32) -> Self {
        self.max_ttl_secs = max_ttl_secs;
        self
    }

    pub fn with_default_time_zone(mut self, zone: impl Into<String>) -> Self {
        self.default_time_zone = zone.into();
        self
    }
}

/// Parses `Z`, `UTC`, `GMT`, `+HH`, `+HHMM` or `+HH:MM` (either sign).
pub fn parse_utc_offset(zone: &str) -> Option<FixedOffset> {
    let zone = zone.trim();
    if zone.eq_ignore_ascii_case("z")
        || zone.eq_ignore_ascii_case("utc")
        || zone.eq_ignore_ascii_case("gmt")
    {
        return FixedOffset::east_opt(0);
    }

    let (sign, digits) = match zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };
    let digits: String = digits.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
