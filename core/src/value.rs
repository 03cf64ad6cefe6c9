//! Cell values for Tern columns.
//!
//! A `CellValue` is the validated, normalized form of a column value. Each
//! variant corresponds to exactly one `ColumnType` and has a canonical binary
//! encoding; equality is byte-exact on that encoding.

use crate::{ColumnType, CoreError, CoreResult};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use uuid::Uuid;

/// A typed value stored in a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CellValue {
    /// 32-bit signed integer.
    Int(i32),
    /// UTF-8 text.
    Text(String),
    /// Timestamp as milliseconds since Unix epoch.
    Timestamp(i64),
    /// IPv4 or IPv6 address.
    Inet(IpAddr),
    /// Any UUID.
    Uuid(Uuid),
    /// Version 1 UUID.
    TimeUuid(Uuid),
    /// Opaque bytes.
    Blob(Vec<u8>),
}

impl CellValue {
    /// Returns the column type this value belongs to.
    pub fn column_type(&self) -> ColumnType {
        match self {
            CellValue::Int(_) => ColumnType::Int,
            CellValue::Text(_) => ColumnType::Text,
            CellValue::Timestamp(_) => ColumnType::Timestamp,
            CellValue::Inet(_) => ColumnType::Inet,
            CellValue::Uuid(_) => ColumnType::Uuid,
            CellValue::TimeUuid(_) => ColumnType::TimeUuid,
            CellValue::Blob(_) => ColumnType::Blob,
        }
    }

    /// Get as integer if this is an Int value.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            CellValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as epoch milliseconds if this is a Timestamp value.
    pub fn as_timestamp(&self) -> Option<i64> {
        match self {
            CellValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Get as address if this is an Inet value.
    pub fn as_inet(&self) -> Option<IpAddr> {
        match self {
            CellValue::Inet(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Get as UUID if this is a Uuid or TimeUuid value.
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            CellValue::Uuid(u) | CellValue::TimeUuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Get as bytes if this is a Blob value.
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            CellValue::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Canonical binary encoding.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            CellValue::Int(i) => i.to_be_bytes().to_vec(),
            CellValue::Text(s) => s.as_bytes().to_vec(),
            CellValue::Timestamp(t) => t.to_be_bytes().to_vec(),
            CellValue::Inet(IpAddr::V4(v4)) => v4.octets().to_vec(),
            CellValue::Inet(IpAddr::V6(v6)) => v6.octets().to_vec(),
            CellValue::Uuid(u) | CellValue::TimeUuid(u) => u.as_bytes().to_vec(),
            CellValue::Blob(b) => b.clone(),
        }
    }

    /// Decode a canonical encoding back into a value of type `ty`.
    pub fn decode(ty: ColumnType, bytes: &[u8]) -> CoreResult<CellValue> {
        let width_error = || {
            CoreError::invalid_encoding(ty, format!("unexpected length {}", bytes.len()))
        };
        match ty {
            ColumnType::Int => {
                let raw: [u8; 4] = bytes.try_into().map_err(|_| width_error())?;
                Ok(CellValue::Int(i32::from_be_bytes(raw)))
            }
            ColumnType::Text => String::from_utf8(bytes.to_vec())
                .map(CellValue::Text)
                .map_err(|e| CoreError::invalid_encoding(ty, e.to_string())),
            ColumnType::Timestamp => {
                let raw: [u8; 8] = bytes.try_into().map_err(|_| width_error())?;
                Ok(CellValue::Timestamp(i64::from_be_bytes(raw)))
            }
            ColumnType::Inet => match bytes.len() {
                4 => {
                    let raw: [u8; 4] = bytes.try_into().map_err(|_| width_error())?;
                    Ok(CellValue::Inet(IpAddr::V4(Ipv4Addr::from(raw))))
                }
                16 => {
                    let raw: [u8; 16] = bytes.try_into().map_err(|_| width_error())?;
                    Ok(CellValue::Inet(IpAddr::V6(Ipv6Addr::from(raw))))
                }
                _ => Err(width_error()),
            },
            ColumnType::Uuid => Uuid::from_slice(bytes)
                .map(CellValue::Uuid)
                .map_err(|_| width_error()),
            ColumnType::TimeUuid => {
                let uuid = Uuid::from_slice(bytes).map_err(|_| width_error())?;
                if uuid.get_version_num() != 1 {
                    return Err(CoreError::invalid_encoding(
                        ty,
                        format!("version {} is not time-based", uuid.get_version_num()),
                    ));
                }
                Ok(CellValue::TimeUuid(uuid))
            }
            ColumnType::Blob => Ok(CellValue::Blob(bytes.to_vec())),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Timestamp(ms) => match DateTime::from_timestamp_millis(*ms) {
                Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.3fZ")),
                None => write!(f, "{}", ms),
            },
            CellValue::Inet(addr) => write!(f, "{}", addr),
            CellValue::Uuid(u) | CellValue::TimeUuid(u) => write!(f, "{}", u.hyphenated()),
            CellValue::Blob(b) => write!(f, "0x{}", hex::encode(b)),
        }
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<IpAddr> for CellValue {
    fn from(addr: IpAddr) -> Self {
        CellValue::Inet(addr)
    }
}

impl From<Ipv4Addr> for CellValue {
    fn from(addr: Ipv4Addr) -> Self {
        CellValue::Inet(IpAddr::V4(addr))
    }
}

impl From<Uuid> for CellValue {
    fn from(u: Uuid) -> Self {
        CellValue::Uuid(u)
    }
}
