//! Identity and time types.
//!
//! - `Generation` tags one incarnation of a table schema
//! - `WriteTime` and `Expiration` are the instants attached to every cell
//!
//! Both instants are microseconds since the Unix epoch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Microseconds per second.
pub const MICROS_PER_SECOND: i64 = 1_000_000;

/// Version tag for one incarnation of a table schema.
///
/// Generations are never reused: dropping a table retires its generation and
/// a later create of the same name allocates a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// Create a Generation from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Write timestamp of a cell, in microseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WriteTime(pub i64);

impl WriteTime {
    pub fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(1_000))
    }

    pub fn as_micros(&self) -> i64 {
        self.0
    }

    /// The instant `seconds` later, saturating at the end of time.
    pub fn plus_seconds(&self, seconds: u32) -> WriteTime {
        WriteTime(
            self.0
                .saturating_add(i64::from(seconds).saturating_mul(MICROS_PER_SECOND)),
        )
    }
}

impl fmt::Display for WriteTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

/// When a cell stops being visible.
///
/// `Never` is a distinct case rather than a zero duration: a TTL of 0 on an
/// insert resets expiration instead of expiring immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expiration {
    /// Live until overwritten or deleted.
    Never,
    /// Live strictly before this instant.
    At(WriteTime),
}

impl Expiration {
    /// Returns true if this expiration is set.
    pub fn is_set(&self) -> bool {
        matches!(self, Expiration::At(_))
    }

    /// Get the expiration instant if one is set.
    pub fn instant(&self) -> Option<WriteTime> {
        match self {
            Expiration::Never => None,
            Expiration::At(t) => Some(*t),
        }
    }

    /// Whole seconds remaining at `now`, if set and not yet reached.
    pub fn remaining_seconds(&self, now: WriteTime) -> Option<i64> {
        match self {
            Expiration::Never => None,
            Expiration::At(t) if t.0 > now.0 => Some((t.0 - now.0) / MICROS_PER_SECOND),
            Expiration::At(_) => Some(0),
        }
    }
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiration::Never => write!(f, "never"),
            Expiration::At(t) => write!(f, "at {}", t),
        }
    }
}
