//! TableDefBuilder for constructing a validated TableDef.

use std::collections::{HashMap, HashSet};

use tern_core::ColumnType;

use crate::{CatalogError, CatalogResult, ColumnDef, ColumnKind, TableDef};

/// Builder for a table definition.
///
/// ```ignore
/// let def = TableDefBuilder::new("test_insert")
///     .column("h1", ColumnType::Int)
///     .column("h2", ColumnType::Text)
///     .column("r1", ColumnType::Int)
///     .column("v1", ColumnType::Int)
///     .partition_key(["h1", "h2"])
///     .clustering_key(["r1"])
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct TableDefBuilder {
    name: String,
    columns: Vec<(String, ColumnType)>,
    partition_key: Vec<String>,
    clustering_key: Vec<String>,
    default_ttl: Option<u32>,
}

impl TableDefBuilder {
    /// Create a new builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            partition_key: Vec::new(),
            clustering_key: Vec::new(),
            default_ttl: None,
        }
    }

    /// Add a column.
    pub fn column(mut self, name: impl Into<String>, ty: ColumnType) -> Self {
        self.columns.push((name.into(), ty));
        self
    }

    /// Set the partition-key columns, in order.
    pub fn partition_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partition_key = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the clustering-key columns, in order.
    pub fn clustering_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clustering_key = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Single-column primary key (`h int PRIMARY KEY`).
    pub fn primary_key(self, column: impl Into<String>) -> Self {
        self.partition_key([column.into()])
    }

    /// TTL applied to inserts that give none.
    pub fn default_ttl(mut self, seconds: u32) -> Self {
        self.default_ttl = Some(seconds);
        self
    }

    /// Validate and build the definition.
    pub fn build(self) -> CatalogResult<TableDef> {
        let table = self.name;

        let mut index = HashMap::new();
        for (i, (name, _)) in self.columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(CatalogError::DuplicateColumn {
                    table,
                    column: name.clone(),
                });
            }
        }

        if self.partition_key.is_empty() {
            return Err(CatalogError::NoPartitionKey { table });
        }

        let mut seen = HashSet::new();
        for column in self.partition_key.iter().chain(self.clustering_key.iter()) {
            if !index.contains_key(column) {
                return Err(CatalogError::UnknownKeyColumn {
                    table,
                    column: column.clone(),
                });
            }
            if !seen.insert(column.as_str()) {
                return Err(CatalogError::DuplicateKeyColumn {
                    table,
                    column: column.clone(),
                });
            }
        }

        let columns = self
            .columns
            .into_iter()
            .map(|(name, ty)| {
                let kind = if self.partition_key.contains(&name) {
                    ColumnKind::PartitionKey
                } else if self.clustering_key.contains(&name) {
                    ColumnKind::ClusteringKey
                } else {
                    ColumnKind::Regular
                };
                ColumnDef { name, ty, kind }
            })
            .collect();

        Ok(TableDef {
            name: table,
            columns,
            partition_key: self.partition_key,
            clustering_key: self.clustering_key,
            default_ttl: self.default_ttl,
            index,
        })
    }
}
