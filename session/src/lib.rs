//! Tern Session
//!
//! Embedded entry point wiring catalog, applier, clock and row store.
//!
//! Responsibilities:
//! - Route DDL to the catalog and purge retired generations from the store
//! - Apply inserts and deletes, handing their records to the store
//! - Serve point, partition and full-table reads as of the clock's now
//! - Render rows in declared column order

mod error;
mod row;
mod session;

pub use error::{SessionError, SessionResult};
pub use row::Row;
pub use session::Session;
