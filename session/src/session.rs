//! Session implementation.

use std::sync::Arc;

use tern_catalog::{Catalog, TableDef};
use tern_codec::Term;
use tern_core::{EngineConfig, Generation, RowDelete, RowUpsert, WriteTime};
use tern_liveness::{Clock, SystemClock};
use tern_mutation::{DeleteRequest, InsertRequest, MutationApplier, MutationError};
use tern_store::{MemStore, RowStore};
use tracing::info;

use crate::error::SessionResult;
use crate::row::Row;

/// An embedded Tern session.
///
/// `Send + Sync`: every method takes `&self`, so one session can be shared
/// across threads behind an `Arc`.
#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    catalog: Arc<Catalog>,
    applier: MutationApplier,
    store: Arc<dyn RowStore>,
}

impl Session {
    /// Create a session over `store`, reading time from `clock`.
    pub fn new(
        config: EngineConfig,
        store: Arc<dyn RowStore>,
        clock: Arc<dyn Clock>,
    ) -> SessionResult<Self> {
        config.validate()?;
        let catalog = Arc::new(Catalog::from_config(&config));
        let applier = MutationApplier::from_config(&config, Arc::clone(&catalog), clock)?;
        Ok(Self {
            config,
            catalog,
            applier,
            store,
        })
    }

    /// Create a session over a fresh in-memory store sharing `clock`.
    pub fn in_memory(config: EngineConfig, clock: Arc<dyn Clock>) -> SessionResult<Self> {
        let store = MemStore::new().with_clock(Arc::clone(&clock));
        Self::new(config, Arc::new(store), clock)
    }

    /// In-memory session with default configuration and the system clock.
    pub fn with_defaults() -> SessionResult<Self> {
        Self::in_memory(EngineConfig::default(), Arc::new(SystemClock))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &Arc<dyn RowStore> {
        &self.store
    }

    /// The instant reads are evaluated at.
    pub fn now(&self) -> WriteTime {
        self.applier.clock().now()
    }

    // ==================== DDL ====================

    /// Create a table; fails if the name is taken.
    pub fn create_table(&self, def: TableDef) -> SessionResult<Generation> {
        Ok(self.catalog.create(def)?)
    }

    /// Create a table unless one of that name exists.
    pub fn create_table_if_not_exists(&self, def: TableDef) -> SessionResult<Generation> {
        Ok(self.catalog.create_if_not_exists(def)?)
    }

    /// Drop a table and discard every row of its generation.
    ///
    /// Mutations resolved against the dropped generation but not yet stored
    /// are refused by the store afterwards.
    pub fn drop_table(&self, name: &str) -> SessionResult<()> {
        let generation = self.catalog.drop_table(name)?;
        let purged = self.store.drop_generation(generation)?;
        info!(table = name, %generation, purged, "purged dropped table");
        Ok(())
    }

    /// Free rows that are dead as of now. Returns how many were removed.
    pub fn purge(&self) -> SessionResult<usize> {
        let removed = self.store.purge(self.now())?;
        info!(removed, "purged dead rows");
        Ok(removed)
    }

    // ==================== Mutations ====================

    /// Apply an INSERT and store the resulting upsert.
    pub fn insert(&self, request: &InsertRequest) -> SessionResult<RowUpsert> {
        let upsert = self.applier.apply_insert(request)?;
        self.store
            .apply_upsert(&upsert)
            .map_err(MutationError::store)?;
        Ok(upsert)
    }

    /// Apply a DELETE and store the resulting tombstones.
    pub fn delete(&self, request: &DeleteRequest) -> SessionResult<RowDelete> {
        let delete = self.applier.apply_delete(request)?;
        self.store
            .apply_delete(&delete)
            .map_err(MutationError::store)?;
        Ok(delete)
    }

    // ==================== Reads ====================

    /// Read one row by full primary key.
    pub fn select_row<I, S, T>(&self, table: &str, key: I) -> SessionResult<Option<Row>>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<Term>,
    {
        let (schema, row_key) = self.applier.resolve_key(table, &collect_terms(key))?;
        let live = self
            .store
            .read_row(schema.generation(), &row_key, self.now())?;
        Ok(live.map(|live| Row::from_live(schema.table(), live)))
    }

    /// Read every row of one partition.
    pub fn select_partition<I, S, T>(&self, table: &str, partition: I) -> SessionResult<Vec<Row>>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<Term>,
    {
        let (schema, values) = self
            .applier
            .resolve_partition(table, &collect_terms(partition))?;
        let rows = self
            .store
            .scan_partition(schema.generation(), &values, self.now())?;
        Ok(rows
            .into_iter()
            .map(|live| Row::from_live(schema.table(), live))
            .collect())
    }

    /// Read every row of a table.
    pub fn select_all(&self, table: &str) -> SessionResult<Vec<Row>> {
        let schema = self.applier.resolve_table(table)?;
        let rows = self.store.scan_table(schema.generation(), self.now())?;
        Ok(rows
            .into_iter()
            .map(|live| Row::from_live(schema.table(), live))
            .collect())
    }
}

fn collect_terms<I, S, T>(terms: I) -> Vec<(String, Term)>
where
    I: IntoIterator<Item = (S, T)>,
    S: Into<String>,
    T: Into<Term>,
{
    terms
        .into_iter()
        .map(|(column, term)| (column.into(), term.into()))
        .collect()
}
