//! Mutation applier - coordinates mutation operations.
//!
//! The applier delegates to the operation modules in `ops/`:
//! - `ops/insert.rs` - INSERT (row upsert)
//! - `ops/delete.rs` - DELETE (row or column tombstones)

use std::sync::Arc;

use tern_catalog::{Catalog, SchemaRef};
use tern_codec::{CodecContext, Term};
use tern_core::{CellValue, ConfigError, EngineConfig, RowDelete, RowKey, RowUpsert};
use tern_liveness::{Clock, LivenessEngine, SystemClock};

use crate::error::{MutationError, MutationResult};
use crate::ops;
use crate::request::{DeleteRequest, InsertRequest};
use crate::validation;

/// Mutation applier.
///
/// Holds no per-request state and performs no I/O, so one applier can
/// serve any number of threads.
#[derive(Debug, Clone)]
pub struct MutationApplier {
    catalog: Arc<Catalog>,
    liveness: LivenessEngine,
    codec_ctx: CodecContext,
    clock: Arc<dyn Clock>,
}

impl MutationApplier {
    /// Create a new applier.
    pub fn new(
        catalog: Arc<Catalog>,
        liveness: LivenessEngine,
        codec_ctx: CodecContext,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            liveness,
            codec_ctx,
            clock,
        }
    }

    /// Create an applier from engine configuration.
    pub fn from_config(
        config: &EngineConfig,
        catalog: Arc<Catalog>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            catalog,
            LivenessEngine::from_config(config),
            CodecContext::new(config.default_offset()?),
            clock,
        ))
    }

    /// Applier with default limits, UTC and the system clock.
    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        Self::new(
            catalog,
            LivenessEngine::default(),
            CodecContext::utc(),
            Arc::new(SystemClock),
        )
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Validate an INSERT and produce its row upsert.
    pub fn apply_insert(&self, request: &InsertRequest) -> MutationResult<RowUpsert> {
        ops::execute_insert(
            &self.catalog,
            &self.liveness,
            &self.codec_ctx,
            self.clock.as_ref(),
            request,
        )
    }

    /// Validate a DELETE and produce its row delete.
    pub fn apply_delete(&self, request: &DeleteRequest) -> MutationResult<RowDelete> {
        ops::execute_delete(
            &self.catalog,
            &self.liveness,
            &self.codec_ctx,
            self.clock.as_ref(),
            request,
        )
    }

    // ==================== Key Lookups ====================

    /// Resolve a table and encode a full primary key for a point read.
    pub fn resolve_key(
        &self,
        table: &str,
        key: &[(String, Term)],
    ) -> MutationResult<(SchemaRef, RowKey)> {
        let schema = validation::resolve_schema(&self.catalog, table, None)?;
        validation::check_key_terms(&schema, key)?;
        validation::check_key_coverage(&schema, key)?;
        let row_key = validation::build_key(&schema, key, &self.codec_ctx)?;
        Ok((schema, row_key))
    }

    /// Resolve a table and encode its partition-key values.
    ///
    /// Clustering-key conditions are rejected; a partition read returns
    /// every row of the partition.
    pub fn resolve_partition(
        &self,
        table: &str,
        partition: &[(String, Term)],
    ) -> MutationResult<(SchemaRef, Vec<CellValue>)> {
        let schema = validation::resolve_schema(&self.catalog, table, None)?;
        validation::check_key_terms(&schema, partition)?;
        for (column, _) in partition {
            if !schema.partition_key.contains(column) {
                return Err(MutationError::not_key_column(&schema.name, column));
            }
        }
        let values =
            validation::encode_key_columns(&schema, &schema.partition_key, partition, &self.codec_ctx)?;
        Ok((schema, values))
    }

    /// Resolve a table for a full scan.
    pub fn resolve_table(&self, table: &str) -> MutationResult<SchemaRef> {
        validation::resolve_schema(&self.catalog, table, None)
    }
}
