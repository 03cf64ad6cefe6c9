//! Mutation operation implementations.
//!
//! Each operation (INSERT, DELETE) is implemented in its own module.

mod delete;
mod insert;

pub use delete::execute_delete;
pub use insert::execute_insert;
