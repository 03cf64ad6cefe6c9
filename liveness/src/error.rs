//! Liveness error types.

use thiserror::Error;

/// Result type for liveness operations.
pub type LivenessResult<T> = Result<T, LivenessError>;

/// Errors raised by `USING TTL` and `USING TIMESTAMP` clauses.
///
/// These are request-level: any of them aborts the whole mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LivenessError {
    #[error("Invalid TTL {value}: must be between 0 and {max} seconds")]
    TtlOutOfRange { value: String, max: u32 },

    #[error("Invalid TTL {literal}: expected an integer, got {kind}")]
    TtlNotInteger { literal: String, kind: &'static str },

    #[error("Invalid write timestamp {literal}: expected an integer number of microseconds")]
    InvalidTimestamp { literal: String },
}

impl LivenessError {
    pub fn ttl_out_of_range(value: impl ToString, max: u32) -> Self {
        Self::TtlOutOfRange {
            value: value.to_string(),
            max,
        }
    }

    pub fn ttl_not_integer(literal: impl Into<String>, kind: &'static str) -> Self {
        Self::TtlNotInteger {
            literal: literal.into(),
            kind,
        }
    }

    pub fn invalid_timestamp(literal: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            literal: literal.into(),
        }
    }
}
