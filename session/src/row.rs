//! Rows as returned by reads.

use std::fmt;

use tern_catalog::TableDef;
use tern_core::{CellValue, RowKey, WriteTime};
use tern_store::{LiveCell, LiveRow};

/// One visible row, with every declared column in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Option<CellValue>>,
    live: LiveRow,
}

impl Row {
    /// Lay out a stored row against its table definition.
    pub(crate) fn from_live(def: &TableDef, live: LiveRow) -> Self {
        let mut columns = Vec::with_capacity(def.columns.len());
        let mut values = Vec::with_capacity(def.columns.len());
        for column in &def.columns {
            let value = match key_position(def, &column.name) {
                Some(i) => live.key.values().nth(i).cloned(),
                None => live.get(&column.name).cloned(),
            };
            columns.push(column.name.clone());
            values.push(value);
        }
        Self {
            columns,
            values,
            live,
        }
    }

    /// Column names in declared order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in declared order; `None` for columns with no live cell.
    pub fn values(&self) -> &[Option<CellValue>] {
        &self.values
    }

    /// Get a value by column name.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values[i].as_ref())
    }

    pub fn key(&self) -> &RowKey {
        &self.live.key
    }

    /// Stored cell of a regular column.
    pub fn cell(&self, column: &str) -> Option<&LiveCell> {
        self.live.cell(column)
    }

    /// Seconds left on a regular column's cell, like `TTL(col)`.
    pub fn ttl(&self, column: &str, now: WriteTime) -> Option<i64> {
        self.live.cell(column).and_then(|c| c.ttl(now))
    }

    /// Write time of a regular column's cell, like `WRITETIME(col)`.
    pub fn write_time(&self, column: &str) -> Option<WriteTime> {
        self.live.cell(column).map(|c| c.write_time)
    }
}

fn key_position(def: &TableDef, column: &str) -> Option<usize> {
    def.partition_key
        .iter()
        .chain(def.clustering_key.iter())
        .position(|k| k == column)
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                Some(v) => write!(f, "{}", v)?,
                None => write!(f, "NULL")?,
            }
        }
        write!(f, "]")
    }
}
