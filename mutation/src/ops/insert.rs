//! INSERT operation - builds a row upsert.

use tern_catalog::Catalog;
use tern_codec::CodecContext;
use tern_core::{CellWrite, Expiration, RowMarker, RowUpsert};
use tern_liveness::{Clock, LivenessEngine};
use tracing::debug;

use crate::error::MutationResult;
use crate::request::InsertRequest;
use crate::validation;

/// Execute an INSERT.
///
/// Every check runs before the record is built, so a failure at any step
/// leaves nothing to hand to the store.
pub fn execute_insert(
    catalog: &Catalog,
    liveness: &LivenessEngine,
    ctx: &CodecContext,
    clock: &dyn Clock,
    request: &InsertRequest,
) -> MutationResult<RowUpsert> {
    // Resolve the table generation
    let schema = validation::resolve_schema(catalog, &request.table, request.pinned)?;

    // Column names and key coverage
    validation::check_columns(&schema, request.values.iter().map(|(c, _)| c.as_str()))?;
    validation::check_key_coverage(&schema, &request.values)?;

    // Encode the key, then each regular column in request order
    let key = validation::build_key(&schema, &request.values, ctx)?;
    let mut encoded = Vec::with_capacity(request.values.len());
    for (column, term) in &request.values {
        if schema.column(column).map_or(true, |c| c.is_key()) {
            continue;
        }
        let value = if term.is_null() {
            None
        } else {
            Some(validation::encode_column(&schema, column, term, ctx)?)
        };
        encoded.push((column.clone(), value));
    }

    // Write time and expiration
    let write_time = liveness.resolve_write_time(request.timestamp.as_ref(), clock)?;
    let expiration =
        liveness.resolve_expiration(request.ttl.as_ref(), schema.default_ttl, write_time)?;

    let cells = encoded
        .into_iter()
        .map(|(column, value)| CellWrite {
            // Tombstones do not expire.
            expiration: if value.is_some() {
                expiration
            } else {
                Expiration::Never
            },
            column,
            value,
            write_time,
        })
        .collect::<Vec<_>>();

    debug!(
        table = %schema.name,
        generation = %schema.generation(),
        cells = cells.len(),
        %write_time,
        %expiration,
        "applied insert"
    );

    Ok(RowUpsert {
        table: schema.name.clone(),
        generation: schema.generation(),
        key,
        marker: RowMarker {
            write_time,
            expiration,
        },
        cells,
    })
}
