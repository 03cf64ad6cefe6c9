//! Mutation error types.

use std::fmt;

use tern_catalog::CatalogError;
use tern_codec::CodecError;
use tern_liveness::LivenessError;
use thiserror::Error;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Coarse classification of a mutation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or mistyped value, or a malformed request.
    Validation,
    /// Well-formed value that breaks a type rule.
    Constraint,
    /// Bad `USING TTL` or `USING TIMESTAMP` clause.
    Ttl,
    /// Table or column lookup failed.
    Schema,
    /// Missing or null primary-key column.
    Key,
    /// Raised by the row store and passed through.
    Store,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Constraint => "constraint",
            ErrorKind::Ttl => "ttl",
            ErrorKind::Schema => "schema",
            ErrorKind::Key => "key",
            ErrorKind::Store => "store",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while applying a mutation.
///
/// None of these leave anything behind: a request either yields a complete
/// record or one of these.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Invalid value for column {column}: {source}")]
    Codec {
        column: String,
        #[source]
        source: CodecError,
    },

    #[error(transparent)]
    Ttl(#[from] LivenessError),

    #[error(transparent)]
    Schema(#[from] CatalogError),

    #[error("Unknown column: {column} in table {table}")]
    UnknownColumn { table: String, column: String },

    #[error("Column {column} given more than once")]
    DuplicateColumn { column: String },

    #[error("Missing primary key column: {column} in table {table}")]
    MissingKeyColumn { table: String, column: String },

    #[error("Null value for primary key column: {column} in table {table}")]
    NullKeyColumn { table: String, column: String },

    #[error("Column {column} is not part of the primary key of {table}")]
    NotKeyColumn { table: String, column: String },

    #[error("Cannot delete primary key column {column} of {table}")]
    KeyColumnDelete { table: String, column: String },

    #[error(transparent)]
    Store(Box<dyn std::error::Error + Send + Sync>),
}

impl MutationError {
    pub fn codec(column: impl Into<String>, source: CodecError) -> Self {
        Self::Codec {
            column: column.into(),
            source,
        }
    }

    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn duplicate_column(column: impl Into<String>) -> Self {
        Self::DuplicateColumn {
            column: column.into(),
        }
    }

    pub fn missing_key_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingKeyColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn null_key_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::NullKeyColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn not_key_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::NotKeyColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn key_column_delete(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::KeyColumnDelete {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Wrap a row store failure without altering it.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MutationError::Codec { source, .. } if source.is_constraint() => ErrorKind::Constraint,
            MutationError::Codec { .. }
            | MutationError::DuplicateColumn { .. }
            | MutationError::NotKeyColumn { .. }
            | MutationError::KeyColumnDelete { .. } => ErrorKind::Validation,
            MutationError::Ttl(_) => ErrorKind::Ttl,
            MutationError::Schema(_) | MutationError::UnknownColumn { .. } => ErrorKind::Schema,
            MutationError::MissingKeyColumn { .. } | MutationError::NullKeyColumn { .. } => {
                ErrorKind::Key
            }
            MutationError::Store(_) => ErrorKind::Store,
        }
    }

    /// The column the failure is attributed to, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            MutationError::Codec { column, .. }
            | MutationError::UnknownColumn { column, .. }
            | MutationError::DuplicateColumn { column }
            | MutationError::MissingKeyColumn { column, .. }
            | MutationError::NullKeyColumn { column, .. }
            | MutationError::NotKeyColumn { column, .. }
            | MutationError::KeyColumnDelete { column, .. } => Some(column.as_str()),
            _ => None,
        }
    }
}
