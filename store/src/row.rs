//! Read views of stored rows.

use std::collections::BTreeMap;

use tern_core::{CellValue, Expiration, RowKey, WriteTime};

/// A cell that is live at the instant it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveCell {
    pub value: CellValue,
    pub write_time: WriteTime,
    pub expiration: Expiration,
}

impl LiveCell {
    /// Seconds left before expiry as of `now`, like `TTL(col)`.
    pub fn ttl(&self, now: WriteTime) -> Option<i64> {
        self.expiration.remaining_seconds(now)
    }
}

/// A row as visible at one instant.
///
/// Only live, non-tombstoned cells are present. A row with no cells is
/// visible through its marker alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveRow {
    pub key: RowKey,
    pub cells: BTreeMap<String, LiveCell>,
}

impl LiveRow {
    /// Get a cell by column name.
    pub fn cell(&self, column: &str) -> Option<&LiveCell> {
        self.cells.get(column)
    }

    /// Get a cell value by column name.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column).map(|c| &c.value)
    }

    /// Returns true if only the row marker keeps this row visible.
    pub fn is_key_only(&self) -> bool {
        self.cells.is_empty()
    }
}
