//! Int, text and blob columns.

use tern_core::{CellValue, ColumnType};

use crate::error::{CodecError, CodecResult};
use crate::literal::{BoundValue, Literal, Term};

pub(crate) fn encode_int(term: &Term) -> CodecResult<CellValue> {
    let ty = ColumnType::Int;
    match term {
        Term::Literal(Literal::Integer(digits)) => match digits.parse::<i32>() {
            Ok(i) => Ok(CellValue::Int(i)),
            // Digits were validated by shape; the only failure left is width.
            Err(_) => Err(CodecError::out_of_range(ty, digits.as_str())),
        },
        Term::Bound(BoundValue::Int(i)) => Ok(CellValue::Int(*i)),
        other => Err(CodecError::type_mismatch(ty, other.kind_name())),
    }
}

pub(crate) fn encode_text(term: &Term) -> CodecResult<CellValue> {
    match term {
        Term::Literal(Literal::Text(s)) | Term::Bound(BoundValue::Text(s)) => {
            Ok(CellValue::Text(s.clone()))
        }
        other => Err(CodecError::type_mismatch(ColumnType::Text, other.kind_name())),
    }
}

pub(crate) fn encode_blob(term: &Term) -> CodecResult<CellValue> {
    let ty = ColumnType::Blob;
    match term {
        Term::Literal(Literal::Hex(token)) => {
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .ok_or_else(|| CodecError::malformed(ty, token.as_str(), "missing 0x prefix"))?;
            hex::decode(digits)
                .map(CellValue::Blob)
                .map_err(|e| CodecError::malformed(ty, token.as_str(), e.to_string()))
        }
        Term::Bound(BoundValue::Blob(bytes)) => Ok(CellValue::Blob(bytes.clone())),
        other => Err(CodecError::type_mismatch(ty, other.kind_name())),
    }
}
