//! Table definition types.

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;

use tern_core::{ColumnType, Generation};

/// Role of a column in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Part of the partition (hash) key.
    PartitionKey,
    /// Part of the clustering (range) key.
    ClusteringKey,
    /// Regular column, one cell per row.
    Regular,
}

/// Column definition within a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Declared type.
    pub ty: ColumnType,
    /// Key role.
    pub kind: ColumnKind,
}

impl ColumnDef {
    /// Returns true for partition- and clustering-key columns.
    pub fn is_key(&self) -> bool {
        !matches!(self.kind, ColumnKind::Regular)
    }
}

/// A validated table definition, independent of any generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    /// Table name, optionally keyspace-qualified (`ks.table`).
    pub name: String,
    /// Columns in declared order.
    pub columns: Vec<ColumnDef>,
    /// Partition-key column names in declared order.
    pub partition_key: Vec<String>,
    /// Clustering-key column names in declared order.
    pub clustering_key: Vec<String>,
    /// TTL applied when an insert gives none.
    pub default_ttl: Option<u32>,
    /// Column positions by name.
    pub(crate) index: HashMap<String, usize>,
}

impl TableDef {
    /// Get a column definition by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Check if this table has a column.
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get the declared type of a column.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.column(name).map(|c| c.ty)
    }

    /// Partition-key then clustering-key column definitions.
    pub fn key_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.partition_key
            .iter()
            .chain(self.clustering_key.iter())
            .filter_map(|name| self.column(name))
    }

    /// Non-key columns in declared order.
    pub fn regular_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| !c.is_key())
    }

    /// Get all column names in declared order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// A (generation, definition) handle returned by the catalog.
///
/// Holding a `SchemaRef` keeps the definition alive after a drop, but the
/// generation no longer resolves, so work prepared against it fails closed.
#[derive(Debug, Clone)]
pub struct SchemaRef {
    generation: Generation,
    table: Arc<TableDef>,
}

impl SchemaRef {
    pub(crate) fn new(generation: Generation, table: TableDef) -> Self {
        Self {
            generation,
            table: Arc::new(table),
        }
    }

    /// Generation this handle was resolved at.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The table definition.
    pub fn table(&self) -> &TableDef {
        &self.table
    }
}

impl Deref for SchemaRef {
    type Target = TableDef;

    fn deref(&self) -> &TableDef {
        &self.table
    }
}
