//! Tern Mutation
//!
//! Turn INSERT and DELETE requests into row records for the store.
//!
//! Responsibilities:
//! - Resolve the table generation (current or pinned)
//! - Check key coverage and column names against the schema
//! - Validate and encode every column value
//! - Resolve write time and expiration
//! - Produce a `RowUpsert` or `RowDelete`, or fail without side effects
//!
//! # Module Structure
//!
//! - `applier` - Main MutationApplier that coordinates operations
//! - `ops/` - Individual operation implementations (insert, delete)
//! - `request` - Inbound request types and their builders
//! - `validation` - Shared schema and key checks
//! - `error` - Error types and the error taxonomy

mod applier;
mod error;
mod ops;
mod request;
mod validation;

pub use applier::MutationApplier;
pub use error::{ErrorKind, MutationError, MutationResult};
pub use request::{DeleteRequest, InsertRequest};
