//! The row store interface.

use std::fmt::Debug;

use tern_core::{CellValue, Generation, RowDelete, RowKey, RowUpsert, WriteTime};

use crate::{LiveRow, StoreResult};

/// Durable home of rows produced by the mutation applier.
///
/// Implementations resolve same-cell conflicts by write time, later
/// application winning ties, and never expose a row of one generation
/// through another. Once a generation is dropped, writes to it fail.
pub trait RowStore: Send + Sync + Debug {
    /// Apply every cell write and the marker of an upsert.
    fn apply_upsert(&self, upsert: &RowUpsert) -> StoreResult<()>;

    /// Apply a row or column delete.
    fn apply_delete(&self, delete: &RowDelete) -> StoreResult<()>;

    /// Read one row as of `now`; `None` if nothing in it is live.
    fn read_row(
        &self,
        generation: Generation,
        key: &RowKey,
        now: WriteTime,
    ) -> StoreResult<Option<LiveRow>>;

    /// Read every visible row of one partition, ordered by key values.
    fn scan_partition(
        &self,
        generation: Generation,
        partition: &[CellValue],
        now: WriteTime,
    ) -> StoreResult<Vec<LiveRow>>;

    /// Read every visible row of a table generation, ordered by key values.
    fn scan_table(&self, generation: Generation, now: WriteTime) -> StoreResult<Vec<LiveRow>>;

    /// Free rows that are dead at `now` and no longer needed for shadowing.
    /// Returns how many were removed.
    fn purge(&self, now: WriteTime) -> StoreResult<usize>;

    /// Discard all rows of a retired generation and refuse later writes to
    /// it. Returns how many rows were held.
    fn drop_generation(&self, generation: Generation) -> StoreResult<usize>;
}
