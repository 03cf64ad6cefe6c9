//! Integration test harness for Tern.
//!
//! Tests drive a `Session` over an in-memory store with a manual clock, so
//! expiry is checked by moving time rather than sleeping.
//!
//! ```ignore
//! use tern_tests::prelude::*;
//!
//! let h = Harness::new();
//! h.create(test_table("t", ColumnType::Text));
//! h.insert_ok(&insert_into("t", &[("h1", "1"), ("h2", "'a'"), ("r1", "2"), ("r2", "'b'")]));
//! h.advance_secs(3);
//! ```

pub mod harness;

pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::harness::*;
    pub use tern_catalog::{CatalogError, TableDef, TableDefBuilder};
    pub use tern_codec::{BoundValue, CodecError, Literal, Term};
    pub use tern_core::{CellValue, ColumnType, EngineConfig, Expiration, Generation, WriteTime};
    pub use tern_liveness::{Clock, LivenessError, ManualClock};
    pub use tern_mutation::{DeleteRequest, ErrorKind, InsertRequest, MutationError};
    pub use tern_session::{Row, Session, SessionError, SessionResult};
    pub use tern_store::{MemStore, RowStore};
}
