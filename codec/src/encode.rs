//! Per-type dispatch for validation and encoding.

use chrono::FixedOffset;
use tern_core::{CellValue, ColumnType};

use crate::error::{CodecError, CodecResult};
use crate::literal::Term;
use crate::{inet, scalar, timestamp, uuid_literal};

/// Inputs the codec needs from its caller.
#[derive(Debug, Clone, Copy)]
pub struct CodecContext {
    /// Offset for timestamp strings that carry no zone.
    pub default_offset: FixedOffset,
}

impl CodecContext {
    pub fn new(default_offset: FixedOffset) -> Self {
        Self { default_offset }
    }

    /// Context whose default zone is UTC.
    pub fn utc() -> Self {
        Self {
            default_offset: FixedOffset::east_opt(0).expect("zero offset is in range"),
        }
    }
}

impl Default for CodecContext {
    fn default() -> Self {
        Self::utc()
    }
}

/// Validate `term` against `ty` and produce its normalized value.
///
/// Nulls are not values: callers decide whether a null is allowed (it is
/// a tombstone for regular columns) before calling this.
pub fn validate_and_encode(
    ty: ColumnType,
    term: &Term,
    ctx: &CodecContext,
) -> CodecResult<CellValue> {
    if term.is_null() {
        return Err(CodecError::type_mismatch(ty, "null"));
    }
    match ty {
        ColumnType::Int => scalar::encode_int(term),
        ColumnType::Text => scalar::encode_text(term),
        ColumnType::Blob => scalar::encode_blob(term),
        ColumnType::Timestamp => timestamp::encode_timestamp(term, ctx.default_offset),
        ColumnType::Inet => inet::encode_inet(term),
        ColumnType::Uuid => uuid_literal::encode_uuid(term),
        ColumnType::TimeUuid => uuid_literal::encode_timeuuid(term),
    }
}
