//! Tern Row Store
//!
//! This crate provides the row store interface and an in-memory reference
//! implementation:
//! - `RowStore`: what the applier's output is handed to
//! - `MemStore`: last-write-wins cells, row and column tombstones,
//!   liveness-filtered reads, generation isolation, reclamation of dead rows
//! - `LiveRow`: the read view of a row at one instant

mod error;
mod mem;
mod row;
mod store;

pub use error::{StoreError, StoreResult};
pub use mem::{MemStore, DEFAULT_TOMBSTONE_GRACE_SECS};
pub use row::{LiveCell, LiveRow};
pub use store::RowStore;
