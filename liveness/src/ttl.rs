//! TTL resolution and liveness evaluation.

use tern_codec::{BoundValue, Literal, Term};
use tern_core::{EngineConfig, Expiration, WriteTime, DEFAULT_MAX_TTL_SECS};
use tracing::trace;

use crate::clock::Clock;
use crate::error::{LivenessError, LivenessResult};

/// A validated `USING TTL` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedTtl {
    /// No clause: the table default applies, if any.
    Absent,
    /// `USING TTL 0`: written cells never expire.
    Reset,
    /// Expire this many seconds after the write time.
    Seconds(u32),
}

/// Validates TTL and write-time clauses and computes expirations.
#[derive(Debug, Clone, Copy)]
pub struct LivenessEngine {
    max_ttl_secs: u32,
}

impl LivenessEngine {
    pub fn new(max_ttl_secs: u32) -> Self {
        Self { max_ttl_secs }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.max_ttl_secs)
    }

    /// Largest accepted TTL in seconds.
    pub fn max_ttl_secs(&self) -> u32 {
        self.max_ttl_secs
    }

    /// Validate a TTL clause.
    ///
    /// Only integer-shaped literals and bound integers are accepted; decimal,
    /// hex, boolean and word tokens are rejected rather than coerced.
    pub fn parse_ttl(&self, term: Option<&Term>) -> LivenessResult<RequestedTtl> {
        let seconds: i64 = match term {
            None => return Ok(RequestedTtl::Absent),
            Some(Term::Literal(Literal::Integer(digits))) => digits
                .parse::<i64>()
                .map_err(|_| LivenessError::ttl_out_of_range(digits, self.max_ttl_secs))?,
            Some(Term::Bound(BoundValue::Int(i))) => i64::from(*i),
            Some(Term::Bound(BoundValue::BigInt(i))) => *i,
            Some(other) => {
                return Err(LivenessError::ttl_not_integer(
                    other.to_string(),
                    other.kind_name(),
                ))
            }
        };
        self.check_seconds(seconds)
    }

    fn check_seconds(&self, seconds: i64) -> LivenessResult<RequestedTtl> {
        if seconds < 0 || seconds > i64::from(self.max_ttl_secs) {
            return Err(LivenessError::ttl_out_of_range(seconds, self.max_ttl_secs));
        }
        // In range, so it fits.
        match seconds as u32 {
            0 => Ok(RequestedTtl::Reset),
            s => Ok(RequestedTtl::Seconds(s)),
        }
    }

    /// Expiration for cells written at `write_time` under `ttl`.
    ///
    /// `default_ttl` is the table's default and only applies when no clause
    /// was given.
    pub fn expiration_for(
        &self,
        ttl: RequestedTtl,
        default_ttl: Option<u32>,
        write_time: WriteTime,
    ) -> LivenessResult<Expiration> {
        let effective = match ttl {
            RequestedTtl::Absent => match default_ttl {
                Some(seconds) => self.check_seconds(i64::from(seconds))?,
                None => RequestedTtl::Reset,
            },
            other => other,
        };
        Ok(match effective {
            RequestedTtl::Seconds(s) => Expiration::At(write_time.plus_seconds(s)),
            RequestedTtl::Absent | RequestedTtl::Reset => Expiration::Never,
        })
    }

    /// Validate a TTL clause and compute the resulting expiration.
    pub fn resolve_expiration(
        &self,
        requested: Option<&Term>,
        default_ttl: Option<u32>,
        write_time: WriteTime,
    ) -> LivenessResult<Expiration> {
        let ttl = self.parse_ttl(requested)?;
        let expiration = self.expiration_for(ttl, default_ttl, write_time)?;
        trace!(?ttl, %write_time, %expiration, "resolved expiration");
        Ok(expiration)
    }

    /// Validate a `USING TIMESTAMP` clause, defaulting to `clock.now()`.
    pub fn resolve_write_time(
        &self,
        requested: Option<&Term>,
        clock: &dyn Clock,
    ) -> LivenessResult<WriteTime> {
        match requested {
            None => Ok(clock.now()),
            Some(Term::Literal(Literal::Integer(digits))) => digits
                .parse::<i64>()
                .map(WriteTime::from_micros)
                .map_err(|_| LivenessError::invalid_timestamp(digits.as_str())),
            Some(Term::Bound(BoundValue::BigInt(micros))) => Ok(WriteTime::from_micros(*micros)),
            Some(Term::Bound(BoundValue::Int(micros))) => {
                Ok(WriteTime::from_micros(i64::from(*micros)))
            }
            Some(other) => Err(LivenessError::invalid_timestamp(other.to_string())),
        }
    }
}

impl Default for LivenessEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TTL_SECS)
    }
}

/// Whether a cell with `expiration` is visible at `now`.
///
/// Pure: reads only its arguments, so any number of readers may evaluate
/// the same cell while it is being overwritten.
pub fn is_live(expiration: Expiration, now: WriteTime) -> bool {
    match expiration {
        Expiration::Never => true,
        Expiration::At(at) => at > now,
    }
}
