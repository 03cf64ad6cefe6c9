//! DELETE operation - builds a row delete.

use tern_catalog::Catalog;
use tern_codec::CodecContext;
use tern_core::{DeleteScope, RowDelete};
use tern_liveness::{Clock, LivenessEngine};
use tracing::debug;

use crate::error::{MutationError, MutationResult};
use crate::request::DeleteRequest;
use crate::validation;

/// Execute a DELETE addressed by full primary key.
pub fn execute_delete(
    catalog: &Catalog,
    liveness: &LivenessEngine,
    ctx: &CodecContext,
    clock: &dyn Clock,
    request: &DeleteRequest,
) -> MutationResult<RowDelete> {
    let schema = validation::resolve_schema(catalog, &request.table, request.pinned)?;

    // Key conditions may only name key columns, each once
    validation::check_key_terms(&schema, &request.key)?;
    validation::check_key_coverage(&schema, &request.key)?;
    let key = validation::build_key(&schema, &request.key, ctx)?;

    // Targeted columns must be regular columns
    validation::check_columns(&schema, request.columns.iter().map(String::as_str))?;
    for column in &request.columns {
        if schema.column(column).map_or(false, |c| c.is_key()) {
            return Err(MutationError::key_column_delete(&schema.name, column));
        }
    }

    let write_time = liveness.resolve_write_time(request.timestamp.as_ref(), clock)?;
    let scope = if request.columns.is_empty() {
        DeleteScope::Row
    } else {
        DeleteScope::Columns(request.columns.clone())
    };

    debug!(
        table = %schema.name,
        generation = %schema.generation(),
        ?scope,
        %write_time,
        "applied delete"
    );

    Ok(RowDelete {
        table: schema.name.clone(),
        generation: schema.generation(),
        key,
        scope,
        write_time,
    })
}
