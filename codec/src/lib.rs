//! Tern Codec
//!
//! Validate literal and bound input against a declared column type and
//! normalize it into a `CellValue`.
//!
//! Responsibilities:
//! - Classify raw literal tokens (integer, decimal, text, uuid-shaped, hex...)
//! - Enforce per-type literal syntax and ranges
//! - Enforce type-specific constraints (timeuuid version)
//! - Report which rule was violated: malformed, wrong type, out of range,
//!   constraint
//!
//! # Module Structure
//!
//! - `literal` - Literal, BoundValue and Term input forms
//! - `encode` - `validate_and_encode` dispatch over `ColumnType`
//! - `scalar` - int, text and blob
//! - `timestamp` - epoch millis and date/time strings
//! - `inet` - IPv4/IPv6 and numeric address forms
//! - `uuid_literal` - uuid and timeuuid
//! - `error` - Error types for validation failures

mod encode;
mod error;
mod inet;
mod literal;
mod scalar;
mod timestamp;
mod uuid_literal;

pub use encode::{validate_and_encode, CodecContext};
pub use error::{CodecError, CodecResult};
pub use literal::{BoundValue, Literal, Term};
