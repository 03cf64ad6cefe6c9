//! Uuid and timeuuid columns.

use regex_lite::Regex;
use std::sync::OnceLock;
use tern_core::{CellValue, ColumnType};
use uuid::Uuid;

use crate::error::{CodecError, CodecResult};
use crate::literal::{BoundValue, Literal, Term};

/// Version nibble of time-based UUIDs.
const TIME_BASED_VERSION: usize = 1;

fn canonical_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
        )
        .expect("uuid pattern")
    })
}

/// Parse the canonical 8-4-4-4-12 grouping and nothing else.
///
/// `Uuid::parse_str` also accepts braced, urn and unhyphenated forms, so
/// the grouping is checked first.
fn parse_canonical(ty: ColumnType, token: &str) -> CodecResult<Uuid> {
    if !canonical_shape().is_match(token) {
        return Err(CodecError::malformed(
            ty,
            token,
            "expected 8-4-4-4-12 hexadecimal groups",
        ));
    }
    Uuid::parse_str(token).map_err(|e| CodecError::malformed(ty, token, e.to_string()))
}

fn uuid_from_term(ty: ColumnType, term: &Term) -> CodecResult<Uuid> {
    match term {
        Term::Literal(Literal::Uuid(token)) => parse_canonical(ty, token),
        Term::Bound(BoundValue::Uuid(u)) => Ok(*u),
        other => Err(CodecError::type_mismatch(ty, other.kind_name())),
    }
}

pub(crate) fn encode_uuid(term: &Term) -> CodecResult<CellValue> {
    uuid_from_term(ColumnType::Uuid, term).map(CellValue::Uuid)
}

pub(crate) fn encode_timeuuid(term: &Term) -> CodecResult<CellValue> {
    let ty = ColumnType::TimeUuid;
    let uuid = uuid_from_term(ty, term)?;
    let version = uuid.get_version_num();
    if version != TIME_BASED_VERSION {
        return Err(CodecError::constraint(
            ty,
            format!("{} has version {}, expected time-based version 1", uuid, version),
        ));
    }
    Ok(CellValue::TimeUuid(uuid))
}
