//! Schema and key checks shared by insert, delete and key lookups.

use std::collections::HashSet;

use tern_catalog::{Catalog, SchemaRef};
use tern_codec::{validate_and_encode, CodecContext, Term};
use tern_core::{CellValue, Generation, RowKey};

use crate::error::{MutationError, MutationResult};

/// Resolve the table a request targets, honouring a pinned generation.
///
/// Reserved names are rejected before any lookup.
pub fn resolve_schema(
    catalog: &Catalog,
    table: &str,
    pinned: Option<Generation>,
) -> MutationResult<SchemaRef> {
    catalog.check_reserved(table)?;
    let schema = match pinned {
        Some(generation) => catalog.resolve_pinned(table, generation)?,
        None => catalog.resolve(table)?,
    };
    Ok(schema)
}

/// Check that every named column exists and appears once.
pub fn check_columns<'a, I>(schema: &SchemaRef, columns: I) -> MutationResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for column in columns {
        if !schema.has_column(column) {
            return Err(MutationError::unknown_column(&schema.name, column));
        }
        if !seen.insert(column) {
            return Err(MutationError::duplicate_column(column));
        }
    }
    Ok(())
}

/// Check that key conditions name only key columns, each once.
pub fn check_key_terms(schema: &SchemaRef, terms: &[(String, Term)]) -> MutationResult<()> {
    check_columns(schema, terms.iter().map(|(c, _)| c.as_str()))?;
    for (column, _) in terms {
        if schema.column(column).map_or(false, |c| !c.is_key()) {
            return Err(MutationError::not_key_column(&schema.name, column));
        }
    }
    Ok(())
}

/// Find the term assigned to `column`.
pub fn find_term<'a>(values: &'a [(String, Term)], column: &str) -> Option<&'a Term> {
    values.iter().find(|(c, _)| c == column).map(|(_, t)| t)
}

/// Encode one column value, attributing failures to the column.
pub fn encode_column(
    schema: &SchemaRef,
    column: &str,
    term: &Term,
    ctx: &CodecContext,
) -> MutationResult<CellValue> {
    let ty = schema
        .column_type(column)
        .ok_or_else(|| MutationError::unknown_column(&schema.name, column))?;
    validate_and_encode(ty, term, ctx).map_err(|e| MutationError::codec(column, e))
}

/// Find the non-null term for a key column.
fn key_term<'a>(
    schema: &SchemaRef,
    values: &'a [(String, Term)],
    column: &str,
) -> MutationResult<&'a Term> {
    match find_term(values, column) {
        None => Err(MutationError::missing_key_column(&schema.name, column)),
        Some(term) if term.is_null() => Err(MutationError::null_key_column(&schema.name, column)),
        Some(term) => Ok(term),
    }
}

/// Check that every partition- and clustering-key column is assigned a
/// non-null term.
pub fn check_key_coverage(schema: &SchemaRef, values: &[(String, Term)]) -> MutationResult<()> {
    for column in schema.key_columns() {
        key_term(schema, values, &column.name)?;
    }
    Ok(())
}

/// Encode the named key columns, in the order given.
pub fn encode_key_columns(
    schema: &SchemaRef,
    columns: &[String],
    values: &[(String, Term)],
    ctx: &CodecContext,
) -> MutationResult<Vec<CellValue>> {
    columns
        .iter()
        .map(|column| {
            let term = key_term(schema, values, column)?;
            encode_column(schema, column, term, ctx)
        })
        .collect()
}

/// Encode the full row key.
pub fn build_key(
    schema: &SchemaRef,
    values: &[(String, Term)],
    ctx: &CodecContext,
) -> MutationResult<RowKey> {
    Ok(RowKey::new(
        encode_key_columns(schema, &schema.partition_key, values, ctx)?,
        encode_key_columns(schema, &schema.clustering_key, values, ctx)?,
    ))
}
