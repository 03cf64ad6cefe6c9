//! Store error types.

use tern_core::Generation;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a row store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Store capacity exceeded: limit is {limit} rows")]
    CapacityExceeded { limit: usize },

    #[error("Record for {table} carries generation {generation} with an empty key")]
    EmptyKey { table: String, generation: Generation },

    #[error("Generation {generation} of {table} was dropped")]
    RetiredGeneration { table: String, generation: Generation },

    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl StoreError {
    pub fn retired_generation(table: impl Into<String>, generation: Generation) -> Self {
        Self::RetiredGeneration {
            table: table.into(),
            generation,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}
