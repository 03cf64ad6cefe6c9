//! Catalog error types.

use tern_core::Generation;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during schema definition and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Table not found: {name}")]
    TableNotFound { name: String },

    #[error("Table not found: {name} (generation {pinned} was dropped, current is {current})")]
    StaleGeneration {
        name: String,
        pinned: Generation,
        current: Generation,
    },

    #[error("Table already exists: {name}")]
    TableExists { name: String },

    #[error("Reserved keyspace: {name} cannot be modified")]
    Reserved { name: String },

    #[error("Table {table} has no partition key")]
    NoPartitionKey { table: String },

    #[error("Duplicate column: {column} in table {table}")]
    DuplicateColumn { table: String, column: String },

    #[error("Key column {column} is not declared in table {table}")]
    UnknownKeyColumn { table: String, column: String },

    #[error("Column {column} appears twice in the primary key of {table}")]
    DuplicateKeyColumn { table: String, column: String },

    #[error("Default TTL of {table} is {ttl}s, above the maximum of {max}s")]
    DefaultTtlOutOfRange { table: String, ttl: u32, max: u32 },
}

impl CatalogError {
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Self::TableNotFound { name: name.into() }
    }

    pub fn table_exists(name: impl Into<String>) -> Self {
        Self::TableExists { name: name.into() }
    }

    pub fn reserved(name: impl Into<String>) -> Self {
        Self::Reserved { name: name.into() }
    }

    /// Returns true for lookups that found nothing usable, stale pins included.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::TableNotFound { .. } | CatalogError::StaleGeneration { .. }
        )
    }
}
