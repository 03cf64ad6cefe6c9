//! Tern Catalog
//!
//! Maps table names to the current generation of their schema.
//!
//! Responsibilities:
//! - Build and validate table definitions (`TableDefBuilder`)
//! - Allocate a fresh generation on every create
//! - Retire generations on drop so stale references fail closed
//! - Reject reserved keyspaces before any lookup

mod builder;
mod catalog;
mod error;
mod schema;

pub use builder::TableDefBuilder;
pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult};
pub use schema::{ColumnDef, ColumnKind, SchemaRef, TableDef};
