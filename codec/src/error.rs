//! Codec error types.

use tern_core::ColumnType;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while validating a value against a column type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Invalid {ty} literal '{literal}': {reason}")]
    Malformed {
        ty: ColumnType,
        literal: String,
        reason: String,
    },

    #[error("Type mismatch: {ty} column cannot take {actual}")]
    TypeMismatch { ty: ColumnType, actual: String },

    #[error("Value out of range for {ty}: {literal}")]
    OutOfRange { ty: ColumnType, literal: String },

    #[error("Constraint violated for {ty}: {reason}")]
    Constraint { ty: ColumnType, reason: String },
}

impl CodecError {
    pub fn malformed(
        ty: ColumnType,
        literal: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            ty,
            literal: literal.into(),
            reason: reason.into(),
        }
    }

    pub fn type_mismatch(ty: ColumnType, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            ty,
            actual: actual.into(),
        }
    }

    pub fn out_of_range(ty: ColumnType, literal: impl Into<String>) -> Self {
        Self::OutOfRange {
            ty,
            literal: literal.into(),
        }
    }

    pub fn constraint(ty: ColumnType, reason: impl Into<String>) -> Self {
        Self::Constraint {
            ty,
            reason: reason.into(),
        }
    }

    /// Returns true for structurally valid values that break a type rule.
    pub fn is_constraint(&self) -> bool {
        matches!(self, CodecError::Constraint { .. })
    }

    /// The declared type the value was checked against.
    pub fn column_type(&self) -> ColumnType {
        match self {
            CodecError::Malformed { ty, .. }
            | CodecError::TypeMismatch { ty, .. }
            | CodecError::OutOfRange { ty, .. }
            | CodecError::Constraint { ty, .. } => *ty,
        }
    }
}
