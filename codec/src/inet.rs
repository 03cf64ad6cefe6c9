//! Inet columns.
//!
//! Addresses arrive as string literals in one of four forms:
//! - dotted IPv4: `'1.2.3.4'`
//! - colon-grouped IPv6: `'fe80::2978:9018:b288:3f6c'`
//! - `0x` hex: a 32-bit IPv4 address, `'0xff'` is `0.0.0.255`
//! - bare decimal: a 32-bit big-endian IPv4 address, `'291913250'` is
//!   `17.102.62.34`

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tern_core::{CellValue, ColumnType};

use crate::error::{CodecError, CodecResult};
use crate::literal::{BoundValue, Literal, Term};

const TY: ColumnType = ColumnType::Inet;

pub(crate) fn encode_inet(term: &Term) -> CodecResult<CellValue> {
    match term {
        Term::Literal(Literal::Text(text)) => parse_inet(text).map(CellValue::Inet),
        Term::Bound(BoundValue::Inet(addr)) => Ok(CellValue::Inet(*addr)),
        other => Err(CodecError::type_mismatch(TY, other.kind_name())),
    }
}

pub(crate) fn parse_inet(text: &str) -> CodecResult<IpAddr> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CodecError::malformed(TY, text, "empty address"));
    }

    if text.contains(':') {
        return text
            .parse::<Ipv6Addr>()
            .map(IpAddr::V6)
            .map_err(|e| CodecError::malformed(TY, text, e.to_string()));
    }

    if text.contains('.') {
        return text
            .parse::<Ipv4Addr>()
            .map(IpAddr::V4)
            .map_err(|e| CodecError::malformed(TY, text, e.to_string()));
    }

    let raw = if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        parse_numeric(text, digits, 16)?
    } else {
        parse_numeric(text, text, 10)?
    };
    Ok(IpAddr::V4(Ipv4Addr::from(raw)))
}

/// Parse a numeric address that must fit in 32 bits.
fn parse_numeric(text: &str, digits: &str, radix: u32) -> CodecResult<u32> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(CodecError::malformed(TY, text, "not an address"));
    }
    // Valid digits that fail to parse can only be too wide.
    u32::from_str_radix(digits, radix).map_err(|_| CodecError::out_of_range(TY, text))
}
