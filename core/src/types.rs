//! Column types.
//!
//! The set of column types is closed: adding one means touching the codec,
//! the canonical encoding and the store together, so every dispatch on
//! `ColumnType` is an exhaustive match.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// The declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 32-bit signed integer.
    Int,
    /// Variable-length UTF-8 text.
    Text,
    /// Millisecond-precision instant.
    Timestamp,
    /// IPv4 or IPv6 address.
    Inet,
    /// Any 128-bit UUID.
    Uuid,
    /// Time-based (version 1) UUID.
    TimeUuid,
    /// Opaque bytes.
    Blob,
}

impl ColumnType {
    /// All column types, in declaration order.
    pub const ALL: [ColumnType; 7] = [
        ColumnType::Int,
        ColumnType::Text,
        ColumnType::Timestamp,
        ColumnType::Inet,
        ColumnType::Uuid,
        ColumnType::TimeUuid,
        ColumnType::Blob,
    ];

    /// Returns the query-language name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Text => "text",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Inet => "inet",
            ColumnType::Uuid => "uuid",
            ColumnType::TimeUuid => "timeuuid",
            ColumnType::Blob => "blob",
        }
    }

    /// Width of the canonical encoding, when it is fixed.
    ///
    /// Inet is either 4 or 16 bytes depending on the address family, so it
    /// has no single fixed width.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            ColumnType::Int => Some(4),
            ColumnType::Timestamp => Some(8),
            ColumnType::Uuid | ColumnType::TimeUuid => Some(16),
            ColumnType::Text | ColumnType::Inet | ColumnType::Blob => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" => Ok(ColumnType::Int),
            "text" | "varchar" => Ok(ColumnType::Text),
            "timestamp" => Ok(ColumnType::Timestamp),
            "inet" => Ok(ColumnType::Inet),
            "uuid" => Ok(ColumnType::Uuid),
            "timeuuid" => Ok(ColumnType::TimeUuid),
            "blob" => Ok(ColumnType::Blob),
            _ => Err(CoreError::UnknownColumnType(s.to_string())),
        }
    }
}
