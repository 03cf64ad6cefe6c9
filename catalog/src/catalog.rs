//! The Catalog - generation-tagged schema lookup.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tern_core::{EngineConfig, Generation, DEFAULT_MAX_TTL_SECS};
use tracing::{info, warn};

use crate::{CatalogError, CatalogResult, SchemaRef, TableDef};

/// The Catalog provides runtime lookup of table schemas.
///
/// `resolve` calls run concurrently under a read lock; `create` and `drop`
/// take the write lock, so a resolve either completes before a drop (and
/// keeps its now-retired handle) or observes the table as gone.
#[derive(Debug)]
pub struct Catalog {
    /// Current schema by table name.
    tables: RwLock<HashMap<String, SchemaRef>>,
    /// Next generation to allocate. Shared by all names, never reused.
    next_generation: AtomicU64,
    /// Lowercased reserved keyspaces.
    reserved_keyspaces: Vec<String>,
    /// Ceiling for table default TTLs.
    max_ttl_secs: u32,
}

impl Catalog {
    /// Create an empty catalog with the given reserved keyspaces.
    pub fn new<I, S>(reserved_keyspaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tables: RwLock::new(HashMap::new()),
            next_generation: AtomicU64::new(1),
            reserved_keyspaces: reserved_keyspaces
                .into_iter()
                .map(|k| k.as_ref().to_ascii_lowercase())
                .collect(),
            max_ttl_secs: DEFAULT_MAX_TTL_SECS,
        }
    }

    /// Create an empty catalog from engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.reserved_keyspaces).with_max_ttl_secs(config.max_ttl_secs)
    }

    /// Refuse tables whose default TTL exceeds `max_ttl_secs`.
    pub fn with_max_ttl_secs(mut self, max_ttl_secs: u32) -> Self {
        self.max_ttl_secs = max_ttl_secs;
        self
    }

    // ==================== Reserved Namespace ====================

    /// Returns true if `name` lives in a reserved keyspace.
    pub fn is_reserved(&self, name: &str) -> bool {
        match name.split_once('.') {
            Some((keyspace, _)) => {
                let keyspace = keyspace.trim().to_ascii_lowercase();
                self.reserved_keyspaces.iter().any(|k| *k == keyspace)
            }
            None => false,
        }
    }

    /// Fail if `name` lives in a reserved keyspace.
    pub fn check_reserved(&self, name: &str) -> CatalogResult<()> {
        if self.is_reserved(name) {
            warn!(table = name, "rejected access to reserved keyspace");
            return Err(CatalogError::reserved(name));
        }
        Ok(())
    }

    // ==================== Lookups ====================

    /// Resolve the current generation of a table.
    pub fn resolve(&self, name: &str) -> CatalogResult<SchemaRef> {
        self.check_reserved(name)?;
        self.tables
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::table_not_found(name))
    }

    /// Resolve a table only if it is still at `generation`.
    ///
    /// Never falls back to a newer generation of the same name.
    pub fn resolve_pinned(&self, name: &str, generation: Generation) -> CatalogResult<SchemaRef> {
        let current = self.resolve(name)?;
        if current.generation() != generation {
            return Err(CatalogError::StaleGeneration {
                name: name.to_string(),
                pinned: generation,
                current: current.generation(),
            });
        }
        Ok(current)
    }

    /// Check if a table currently exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    /// Names of all current tables, sorted.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.read().len()
    }

    // ==================== DDL ====================

    /// Register a table under a fresh generation.
    pub fn create(&self, def: TableDef) -> CatalogResult<Generation> {
        self.check_definition(&def)?;
        let mut tables = self.tables.write();
        if tables.contains_key(&def.name) {
            return Err(CatalogError::table_exists(def.name));
        }
        let generation = self.allocate_generation();
        info!(table = %def.name, %generation, "created table");
        tables.insert(def.name.clone(), SchemaRef::new(generation, def));
        Ok(generation)
    }

    /// Register a table unless one of that name exists; returns the
    /// generation now current either way.
    pub fn create_if_not_exists(&self, def: TableDef) -> CatalogResult<Generation> {
        self.check_definition(&def)?;
        let mut tables = self.tables.write();
        if let Some(existing) = tables.get(&def.name) {
            return Ok(existing.generation());
        }
        let generation = self.allocate_generation();
        info!(table = %def.name, %generation, "created table");
        tables.insert(def.name.clone(), SchemaRef::new(generation, def));
        Ok(generation)
    }

    /// Remove a table and retire its generation, which is returned.
    pub fn drop_table(&self, name: &str) -> CatalogResult<Generation> {
        self.check_reserved(name)?;
        let removed = self
            .tables
            .write()
            .remove(name)
            .ok_or_else(|| CatalogError::table_not_found(name))?;
        info!(table = name, generation = %removed.generation(), "dropped table");
        Ok(removed.generation())
    }

    fn check_definition(&self, def: &TableDef) -> CatalogResult<()> {
        self.check_reserved(&def.name)?;
        match def.default_ttl {
            Some(ttl) if ttl > self.max_ttl_secs => Err(CatalogError::DefaultTtlOutOfRange {
                table: def.name.clone(),
                ttl,
                max: self.max_ttl_secs,
            }),
            _ => Ok(()),
        }
    }

    fn allocate_generation(&self) -> Generation {
        Generation::new(self.next_generation.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
