//! In-memory row store.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use parking_lot::RwLock;
use tern_core::{
    CellValue, DeleteScope, Expiration, Generation, RowDelete, RowKey, RowMarker, RowUpsert,
    WriteTime,
};
use tern_liveness::{is_live, Clock, SystemClock};
use tracing::{debug, trace};

use crate::{LiveCell, LiveRow, RowStore, StoreError, StoreResult};

/// How long row and cell tombstones are kept after their write time: 10 days.
pub const DEFAULT_TOMBSTONE_GRACE_SECS: u32 = 864_000;

/// One stored cell version; `value: None` is a tombstone.
#[derive(Debug, Clone)]
struct StoredCell {
    value: Option<CellValue>,
    write_time: WriteTime,
    expiration: Expiration,
}

/// Everything held for one row key.
#[derive(Debug, Clone)]
struct StoredRow {
    key: RowKey,
    marker: Option<RowMarker>,
    /// Latest whole-row delete. Writes at or before it are shadowed.
    deleted_at: Option<WriteTime>,
    cells: BTreeMap<String, StoredCell>,
}

impl StoredRow {
    fn new(key: RowKey) -> Self {
        Self {
            key,
            marker: None,
            deleted_at: None,
            cells: BTreeMap::new(),
        }
    }

    fn shadowed(&self, write_time: WriteTime) -> bool {
        self.deleted_at.map_or(false, |d| write_time <= d)
    }

    fn write_marker(&mut self, marker: RowMarker) {
        if self.shadowed(marker.write_time) {
            return;
        }
        match self.marker {
            Some(existing) if existing.write_time > marker.write_time => {}
            _ => self.marker = Some(marker),
        }
    }

    /// Last write wins; on equal write times the later application wins.
    fn write_cell(&mut self, column: String, cell: StoredCell) {
        if self.shadowed(cell.write_time) {
            return;
        }
        match self.cells.get(&column) {
            Some(existing) if existing.write_time > cell.write_time => {}
            _ => {
                self.cells.insert(column, cell);
            }
        }
    }

    fn delete_row(&mut self, at: WriteTime) {
        self.deleted_at = Some(self.deleted_at.map_or(at, |d| d.max(at)));
        if self.marker.map_or(false, |m| m.write_time <= at) {
            self.marker = None;
        }
        self.cells.retain(|_, c| c.write_time > at);
    }

    fn is_visible(&self, now: WriteTime) -> bool {
        self.marker.map_or(false, |m| is_live(m.expiration, now))
            || self
                .cells
                .values()
                .any(|c| c.value.is_some() && is_live(c.expiration, now))
    }

    /// True once nothing is live and every tombstone is older than `grace_secs`.
    fn reclaimable(&self, now: WriteTime, grace_secs: u32) -> bool {
        if self.is_visible(now) {
            return false;
        }
        let newest_tombstone = self
            .cells
            .values()
            .filter(|c| c.value.is_none())
            .map(|c| c.write_time)
            .chain(self.deleted_at)
            .max();
        newest_tombstone.map_or(true, |t| t.plus_seconds(grace_secs) <= now)
    }

    fn view(&self, now: WriteTime) -> Option<LiveRow> {
        if !self.is_visible(now) {
            return None;
        }
        let cells = self
            .cells
            .iter()
            .filter(|(_, c)| is_live(c.expiration, now))
            .filter_map(|(name, c)| {
                let value = c.value.clone()?;
                Some((
                    name.clone(),
                    LiveCell {
                        value,
                        write_time: c.write_time,
                        expiration: c.expiration,
                    },
                ))
            })
            .collect();
        Some(LiveRow {
            key: self.key.clone(),
            cells,
        })
    }
}

type Slot = (Generation, Vec<u8>);

#[derive(Debug, Default)]
struct Inner {
    rows: BTreeMap<Slot, StoredRow>,
    /// Generations purged by `drop_generation`; writes to them are refused.
    retired: BTreeSet<Generation>,
}

impl Inner {
    fn reclaim(&mut self, now: WriteTime, grace_secs: u32) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, row| !row.reclaimable(now, grace_secs));
        before - self.rows.len()
    }
}

/// Row store kept in a single ordered map.
///
/// Keys are (generation, encoded row key), so a partition is a contiguous
/// range and rows of different generations never collide. Dead rows are
/// reclaimed by `purge`, and on demand when a capacity limit is reached.
#[derive(Debug)]
pub struct MemStore {
    inner: RwLock<Inner>,
    /// Maximum number of distinct row keys held.
    capacity: Option<usize>,
    tombstone_grace_secs: u32,
    clock: Arc<dyn Clock>,
}

impl Default for MemStore {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            capacity: None,
            tombstone_grace_secs: DEFAULT_TOMBSTONE_GRACE_SECS,
            clock: Arc::new(SystemClock),
        }
    }
}

impl MemStore {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that refuses new row keys beyond `limit`.
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            capacity: Some(limit),
            ..Self::default()
        }
    }

    /// Read the time used to reclaim dead rows from `clock`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Keep tombstones for `secs` after their write time.
    pub fn with_tombstone_grace(mut self, secs: u32) -> Self {
        self.tombstone_grace_secs = secs;
        self
    }

    /// Number of row keys held, dead or alive.
    pub fn stored_rows(&self) -> usize {
        self.inner.read().rows.len()
    }

    fn with_row<F>(&self, table: &str, generation: Generation, key: &RowKey, f: F) -> StoreResult<()>
    where
        F: FnOnce(&mut StoredRow),
    {
        if key.partition.is_empty() {
            return Err(StoreError::EmptyKey {
                table: table.to_string(),
                generation,
            });
        }
        let slot = (generation, key.encode());
        let mut inner = self.inner.write();
        if inner.retired.contains(&generation) {
            return Err(StoreError::retired_generation(table, generation));
        }
        if !inner.rows.contains_key(&slot) {
            if let Some(limit) = self.capacity {
                if inner.rows.len() >= limit {
                    let reclaimed = inner.reclaim(self.clock.now(), self.tombstone_grace_secs);
                    debug!(reclaimed, limit, "store at capacity, reclaimed dead rows");
                }
                if inner.rows.len() >= limit {
                    return Err(StoreError::CapacityExceeded { limit });
                }
            }
        }
        let row = inner
            .rows
            .entry(slot)
            .or_insert_with(|| StoredRow::new(key.clone()));
        f(row);
        Ok(())
    }
}

/// Order rows by their key values rather than by encoded bytes.
fn in_key_order(mut rows: Vec<LiveRow>) -> Vec<LiveRow> {
    rows.sort_by(|a, b| a.key.values().cmp(b.key.values()));
    rows
}

impl RowStore for MemStore {
    fn apply_upsert(&self, upsert: &RowUpsert) -> StoreResult<()> {
        self.with_row(&upsert.table, upsert.generation, &upsert.key, |row| {
            row.write_marker(upsert.marker);
            for cell in &upsert.cells {
                row.write_cell(
                    cell.column.clone(),
                    StoredCell {
                        value: cell.value.clone(),
                        write_time: cell.write_time,
                        expiration: cell.expiration,
                    },
                );
            }
        })?;
        trace!(table = %upsert.table, generation = %upsert.generation, "stored upsert");
        Ok(())
    }

    fn apply_delete(&self, delete: &RowDelete) -> StoreResult<()> {
        self.with_row(&delete.table, delete.generation, &delete.key, |row| {
            match &delete.scope {
                DeleteScope::Row => row.delete_row(delete.write_time),
                DeleteScope::Columns(columns) => {
                    for column in columns {
                        row.write_cell(
                            column.clone(),
                            StoredCell {
                                value: None,
                                write_time: delete.write_time,
                                expiration: Expiration::Never,
                            },
                        );
                    }
                }
            }
        })?;
        trace!(table = %delete.table, generation = %delete.generation, "stored delete");
        Ok(())
    }

    fn read_row(
        &self,
        generation: Generation,
        key: &RowKey,
        now: WriteTime,
    ) -> StoreResult<Option<LiveRow>> {
        Ok(self
            .inner
            .read()
            .rows
            .get(&(generation, key.encode()))
            .and_then(|row| row.view(now)))
    }

    fn scan_partition(
        &self,
        generation: Generation,
        partition: &[CellValue],
        now: WriteTime,
    ) -> StoreResult<Vec<LiveRow>> {
        let prefix = RowKey::new(partition.to_vec(), Vec::new()).encode_partition();
        let inner = self.inner.read();
        let rows = inner
            .rows
            .range((generation, prefix.clone())..)
            .take_while(|((g, k), _)| *g == generation && k.starts_with(&prefix))
            .filter_map(|(_, row)| row.view(now))
            .collect();
        Ok(in_key_order(rows))
    }

    fn scan_table(&self, generation: Generation, now: WriteTime) -> StoreResult<Vec<LiveRow>> {
        let inner = self.inner.read();
        let rows = inner
            .rows
            .range((generation, Vec::new())..)
            .take_while(|((g, _), _)| *g == generation)
            .filter_map(|(_, row)| row.view(now))
            .collect();
        Ok(in_key_order(rows))
    }

    fn purge(&self, now: WriteTime) -> StoreResult<usize> {
        let removed = self.inner.write().reclaim(now, self.tombstone_grace_secs);
        debug!(removed, "purged dead rows");
        Ok(removed)
    }

    fn drop_generation(&self, generation: Generation) -> StoreResult<usize> {
        let mut inner = self.inner.write();
        inner.retired.insert(generation);
        let before = inner.rows.len();
        inner.rows.retain(|(g, _), _| *g != generation);
        let removed = before - inner.rows.len();
        debug!(%generation, removed, "dropped generation");
        Ok(removed)
    }
}
