//! Row-level records exchanged between the mutation applier and the row store.

use crate::{CellValue, Expiration, Generation, WriteTime};
use serde::{Deserialize, Serialize};

/// Encoded identity of a row within one table generation.
///
/// Partition-key values come first, then clustering-key values, each in
/// declared order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowKey {
    /// Partition-key values in declared order.
    pub partition: Vec<CellValue>,
    /// Clustering-key values in declared order.
    pub clustering: Vec<CellValue>,
}

impl RowKey {
    pub fn new(partition: Vec<CellValue>, clustering: Vec<CellValue>) -> Self {
        Self {
            partition,
            clustering,
        }
    }

    /// Encoded partition prefix. Rows of one partition share it.
    pub fn encode_partition(&self) -> Vec<u8> {
        let mut out = Vec::new();
        append_components(&mut out, &self.partition);
        out
    }

    /// Full encoded identity: partition prefix followed by clustering values.
    ///
    /// Every component is length-prefixed so that no two distinct keys share
    /// an encoding.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = self.encode_partition();
        append_components(&mut out, &self.clustering);
        out
    }

    /// All key values, partition first.
    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.partition.iter().chain(self.clustering.iter())
    }
}

fn append_components(out: &mut Vec<u8>, values: &[CellValue]) {
    for value in values {
        let bytes = value.encode();
        out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        out.extend_from_slice(&bytes);
    }
}

/// Key-only pseudo-cell written by every insert.
///
/// Keeps a row visible while it has no live regular cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMarker {
    pub write_time: WriteTime,
    pub expiration: Expiration,
}

/// One cell write within an upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellWrite {
    /// Non-key column name.
    pub column: String,
    /// New value; `None` writes a tombstone.
    pub value: Option<CellValue>,
    pub write_time: WriteTime,
    pub expiration: Expiration,
}

impl CellWrite {
    /// Returns true if this write deletes the cell.
    pub fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }
}

/// Row upsert produced by an insert.
///
/// Each cell write replaces the prior cell for its column; columns absent
/// from `cells` are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowUpsert {
    pub table: String,
    pub generation: Generation,
    pub key: RowKey,
    pub marker: RowMarker,
    pub cells: Vec<CellWrite>,
}

impl RowUpsert {
    /// Get the cell write for a column.
    pub fn cell(&self, column: &str) -> Option<&CellWrite> {
        self.cells.iter().find(|c| c.column == column)
    }
}

/// What a delete removes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteScope {
    /// The row marker and every cell.
    Row,
    /// Only the named non-key columns.
    Columns(Vec<String>),
}

/// Row delete produced by a delete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDelete {
    pub table: String,
    pub generation: Generation,
    pub key: RowKey,
    pub scope: DeleteScope,
    pub write_time: WriteTime,
}
