//! Timestamp columns.
//!
//! Accepted forms:
//! - integer literal: epoch milliseconds
//! - `YYYY-MM-DD`, optionally followed by `T` or a space and `HH:MM`,
//!   `HH:MM:SS` or `HH:MM:SS.fff` (one fractional group, 1-9 digits), and
//!   optionally by a zone: `Z`, `UTC`, `GMT`, `+HH`, `+HHMM`, `+HH:MM`
//!
//! Strings without a zone are read in the caller-supplied default offset.

use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeZone};
use regex_lite::Regex;
use std::sync::OnceLock;
use tern_core::{parse_utc_offset, CellValue, ColumnType};

use crate::error::{CodecError, CodecResult};
use crate::literal::{BoundValue, Literal, Term};

const TY: ColumnType = ColumnType::Timestamp;

fn timestamp_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[T ](\d{1,2}):(\d{2})(?::(\d{2})(?:\.(\d{1,9}))?)?)?(?:\s*(Z|z|UTC|GMT|[+-]\d{2}(?::?\d{2})?))?$",
        )
        .expect("timestamp pattern")
    })
}

pub(crate) fn encode_timestamp(term: &Term, default_offset: FixedOffset) -> CodecResult<CellValue> {
    match term {
        Term::Literal(Literal::Integer(digits)) => digits
            .parse::<i64>()
            .map(CellValue::Timestamp)
            .map_err(|_| CodecError::out_of_range(TY, digits.as_str())),
        Term::Literal(Literal::Text(text)) => {
            parse_timestamp(text, default_offset).map(CellValue::Timestamp)
        }
        Term::Bound(BoundValue::Timestamp(ms)) => Ok(CellValue::Timestamp(*ms)),
        other => Err(CodecError::type_mismatch(TY, other.kind_name())),
    }
}

/// Parse a date/time string into epoch milliseconds.
pub(crate) fn parse_timestamp(text: &str, default_offset: FixedOffset) -> CodecResult<i64> {
    let malformed = |reason: &str| CodecError::malformed(TY, text, reason);

    let caps = timestamp_shape()
        .captures(text.trim())
        .ok_or_else(|| malformed("expected YYYY-MM-DD[ HH:MM[:SS[.fff]]][zone]"))?;

    let field = |i: usize| -> CodecResult<u32> {
        match caps.get(i) {
            Some(m) => m.as_str().parse::<u32>().map_err(|_| malformed("bad number")),
            None => Ok(0),
        }
    };

    let year = caps
        .get(1)
        .map(|m| m.as_str())
        .unwrap_or_default()
        .parse::<i32>()
        .map_err(|_| malformed("bad year"))?;
    let date = NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)
        .ok_or_else(|| malformed("no such calendar date"))?;

    let millis = match caps.get(7) {
        Some(m) => {
            // Truncate to millisecond precision.
            let mut digits: String = m.as_str().chars().take(3).collect();
            while digits.len() < 3 {
                digits.push('0');
            }
            digits.parse::<u32>().map_err(|_| malformed("bad fraction"))?
        }
        None => 0,
    };
    let time = NaiveTime::from_hms_milli_opt(field(4)?, field(5)?, field(6)?, millis)
        .ok_or_else(|| malformed("no such time of day"))?;

    let offset = match caps.get(8) {
        Some(zone) => parse_utc_offset(zone.as_str()).ok_or_else(|| malformed("bad zone"))?,
        None => default_offset,
    };

    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| malformed("instant out of range"))
}
