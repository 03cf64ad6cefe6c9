//! Session error types.

use tern_catalog::CatalogError;
use tern_core::ConfigError;
use tern_mutation::{ErrorKind, MutationError};
use tern_store::StoreError;
use thiserror::Error;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Mutation error, including store failures while applying one.
    #[error(transparent)]
    Mutation(#[from] MutationError),

    /// DDL error.
    #[error(transparent)]
    Schema(#[from] CatalogError),

    /// Store error during a read or a drop.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid engine configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SessionError {
    /// Classify this error with the mutation taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Mutation(e) => e.kind(),
            SessionError::Schema(_) => ErrorKind::Schema,
            SessionError::Store(_) => ErrorKind::Store,
            SessionError::Config(_) => ErrorKind::Validation,
        }
    }

    /// Returns true for lookups of a table that does not exist (any more).
    pub fn is_not_found(&self) -> bool {
        match self {
            SessionError::Mutation(MutationError::Schema(e)) | SessionError::Schema(e) => {
                e.is_not_found()
            }
            _ => false,
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
