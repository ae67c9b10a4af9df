//! Row materialization
//!
//! Drives the cursor produced by an executed statement and populates a
//! destination from its rows. Columns bind to fields by naming convention;
//! sequence-typed fields are captured raw during the row scan and resolved
//! afterwards through the array codec. The cursor is closed on every exit
//! path.

use pg_dialect::{array, FieldKind, PgValue};
use tracing::debug;

use crate::cursor::{RowCursor, StatementExecutor};
use crate::errors::FetchError;
use crate::record::{column_to_field_name, Record};
use crate::scope::{BindMode, QueryScope};

/// Where materialized rows land: one structure, or a growable sequence of
/// structures, optionally held through a pointer indirection.
///
/// For `Single`, the caller must have limited the query to at most one row
/// before execution.
#[derive(Debug)]
pub enum Destination<'a, T> {
    Single(&'a mut T),
    Sequence(&'a mut Vec<T>),
    BoxedSequence(&'a mut Vec<Box<T>>),
}

impl<T> Destination<'_, T> {
    fn is_single(&self) -> bool {
        matches!(self, Destination::Single(_))
    }
}

/// Materialize a query's result rows into `dest`.
///
/// Executes the scope's statement, binds each row to the destination, and
/// returns the first error recorded during the call, if any. Zero rows is
/// the `NotFound` condition for a single destination and an empty sequence
/// otherwise.
pub async fn fetch<T, E>(
    executor: &E,
    scope: &mut QueryScope,
    mut dest: Destination<'_, T>,
) -> Result<(), FetchError>
where
    T: Record,
    E: StatementExecutor,
{
    let params = scope.prepared_params();
    debug!(sql = scope.sql(), params = params.len(), "executing statement");

    let mut cursor = match executor.execute(scope.sql(), &params).await {
        Ok(cursor) => cursor,
        Err(e) => {
            // Fatal: the cursor was never produced, nothing to close.
            scope.record_error(e.clone());
            return Err(e);
        }
    };

    let outcome = drive(&mut cursor, scope, &mut dest).await;
    let closed = cursor.close().await;

    outcome?;
    closed?;
    match scope.first_error() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Materialize a single-row query into a fresh record.
pub async fn fetch_one<T, E>(executor: &E, scope: &mut QueryScope) -> Result<T, FetchError>
where
    T: Record,
    E: StatementExecutor,
{
    let mut record = T::default();
    fetch(executor, scope, Destination::Single(&mut record)).await?;
    Ok(record)
}

/// Materialize every result row, in cursor order.
pub async fn fetch_all<T, E>(executor: &E, scope: &mut QueryScope) -> Result<Vec<T>, FetchError>
where
    T: Record,
    E: StatementExecutor,
{
    let mut records = Vec::new();
    fetch(executor, scope, Destination::Sequence(&mut records)).await?;
    Ok(records)
}

/// Materialize every result row into boxed elements.
pub async fn fetch_all_boxed<T, E>(
    executor: &E,
    scope: &mut QueryScope,
) -> Result<Vec<Box<T>>, FetchError>
where
    T: Record,
    E: StatementExecutor,
{
    let mut records = Vec::new();
    fetch(executor, scope, Destination::BoxedSequence(&mut records)).await?;
    Ok(records)
}

/// Iterate the cursor and bind every row. Returns `Err` only for conditions
/// that abort the call; recoverable errors are recorded on the scope.
async fn drive<T, C>(
    cursor: &mut C,
    scope: &mut QueryScope,
    dest: &mut Destination<'_, T>,
) -> Result<(), FetchError>
where
    T: Record,
    C: RowCursor,
{
    let plan = bind_plan::<T>(cursor.columns(), scope)?;
    let columns: Vec<String> = cursor.columns().to_vec();
    let mut produced = 0usize;

    loop {
        let values = match cursor.next_row().await {
            Ok(Some(values)) => values,
            Ok(None) => break,
            Err(error) => {
                // The cursor has already advanced past the failed row.
                scope.record_error(error.clone());
                if scope.mode() == BindMode::Strict {
                    return Err(error);
                }
                continue;
            }
        };

        match dest {
            Destination::Single(record) => {
                bind_row(*record, &columns, &plan, values, scope)?;
            }
            Destination::Sequence(records) => {
                let mut record = T::default();
                bind_row(&mut record, &columns, &plan, values, scope)?;
                records.push(record);
            }
            Destination::BoxedSequence(records) => {
                let mut record = T::default();
                bind_row(&mut record, &columns, &plan, values, scope)?;
                records.push(Box::new(record));
            }
        }
        produced += 1;
    }

    if produced == 0 && dest.is_single() {
        scope.record_error(FetchError::NotFound);
        return Err(FetchError::NotFound);
    }
    Ok(())
}

/// Resolve each result column to a destination field index, once per call.
/// Unmatched columns keep their slot so later columns stay aligned.
fn bind_plan<T: Record>(
    columns: &[String],
    scope: &mut QueryScope,
) -> Result<Vec<Option<usize>>, FetchError> {
    let mut plan = Vec::with_capacity(columns.len());
    for column in columns {
        let index = T::field_index(&column_to_field_name(column));
        if index.is_none() {
            debug!(column = column.as_str(), "column matched no field");
            if scope.mode() == BindMode::Strict {
                let error = FetchError::UnmatchedColumn {
                    column: column.clone(),
                };
                scope.record_error(error.clone());
                return Err(error);
            }
        }
        plan.push(index);
    }
    Ok(plan)
}

/// Bind one row's values into a record: scalar fields directly, sequence
/// fields deferred until the scalar pass completes, then the loaded hook.
fn bind_row<T: Record>(
    record: &mut T,
    columns: &[String],
    plan: &[Option<usize>],
    values: Vec<PgValue>,
    scope: &mut QueryScope,
) -> Result<(), FetchError> {
    let fields = T::fields();
    let mut deferred: Vec<(usize, usize, PgValue)> = Vec::new();

    for (position, value) in values.into_iter().enumerate() {
        let Some(Some(field_index)) = plan.get(position).copied() else {
            // Unmatched column: the value falls into the discard sink.
            continue;
        };
        let field = &fields[field_index];

        if field.kind.is_sequence() {
            deferred.push((position, field_index, value));
            continue;
        }

        if let Err(e) = (field.set)(record, value) {
            record_bind_error(scope, &columns[position], &e)?;
        }
    }

    for (position, field_index, raw) in deferred {
        let field = &fields[field_index];
        let FieldKind::Seq(elem) = field.kind else {
            continue;
        };
        match array::decode_array(&raw, elem) {
            // A `None` resolution leaves the field at its default value.
            Ok(Some(resolved)) => {
                if let Err(e) = (field.set)(record, resolved) {
                    record_bind_error(scope, &columns[position], &e)?;
                }
            }
            Ok(None) => {}
            Err(e) => record_bind_error(scope, &columns[position], &e)?,
        }
    }

    record.on_loaded();
    Ok(())
}

/// Record a per-field bind failure on the shared channel; in strict mode the
/// failure also aborts the call.
fn record_bind_error(
    scope: &mut QueryScope,
    column: &str,
    reason: &dyn std::fmt::Display,
) -> Result<(), FetchError> {
    let error = FetchError::Bind {
        column: column.to_string(),
        reason: reason.to_string(),
    };
    scope.record_error(error.clone());
    if scope.mode() == BindMode::Strict {
        return Err(error);
    }
    Ok(())
}
