//! Tern Core Types
//!
//! This crate provides the foundational types shared by every Tern component:
//! - Column types (the closed `ColumnType` enum)
//! - Cell values and their canonical binary encoding
//! - Identity and time types (Generation, WriteTime, Expiration)
//! - Row records handed to the row store (RowKey, RowUpsert, RowDelete)
//! - Engine configuration
//! - Common error types

mod config;
mod error;
mod id;
mod row;
mod types;
mod value;

pub use config::*;
pub use error::*;
pub use id::*;
pub use row::*;
pub use types::*;
pub use value::*;
