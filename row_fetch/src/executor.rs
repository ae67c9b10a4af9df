//! sqlx-backed statement executor
//!
//! Adapts a `PgPool` to the executor/cursor interface: binds `PgValue`
//! parameters onto the statement, fetches the result set, and serves it
//! through a forward-only cursor that decodes each column into a `PgValue`
//! by its reported Postgres type name.

use async_trait::async_trait;
use pg_dialect::{array, PgValue};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row, TypeInfo, ValueRef};
use tracing::debug;

use crate::cursor::{RowCursor, StatementExecutor};
use crate::errors::FetchError;

/// Executes statements against a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgPoolExecutor {
    pool: PgPool,
}

impl PgPoolExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StatementExecutor for PgPoolExecutor {
    type Cursor = PgRowCursor;

    async fn execute(&self, sql: &str, params: &[PgValue]) -> Result<Self::Cursor, FetchError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_value(query, param);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| FetchError::Execution(e.to_string()))?;

        let columns = rows
            .first()
            .map(|row| {
                row.columns()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect()
            })
            .unwrap_or_default();

        debug!(rows = rows.len(), "statement executed");
        Ok(PgRowCursor {
            columns,
            rows: rows.into_iter(),
        })
    }
}

/// Cursor over an already-fetched result set.
pub struct PgRowCursor {
    columns: Vec<String>,
    rows: std::vec::IntoIter<PgRow>,
}

#[async_trait]
impl RowCursor for PgRowCursor {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    async fn next_row(&mut self) -> Result<Option<Vec<PgValue>>, FetchError> {
        let Some(row) = self.rows.next() else {
            return Ok(None);
        };

        let mut values = Vec::with_capacity(self.columns.len());
        for (index, column) in row.columns().iter().enumerate() {
            let value = decode_column(&row, index, column.type_info().name()).map_err(|e| {
                FetchError::Bind {
                    column: column.name().to_string(),
                    reason: e.to_string(),
                }
            })?;
            values.push(value);
        }
        Ok(Some(values))
    }

    async fn close(&mut self) -> Result<(), FetchError> {
        // The result set was materialized up front; dropping the remaining
        // rows releases everything still held.
        self.rows = Vec::new().into_iter();
        Ok(())
    }
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    param: &PgValue,
) -> Query<'q, Postgres, PgArguments> {
    match param {
        PgValue::Null => query.bind(Option::<String>::None),
        PgValue::Bool(b) => query.bind(*b),
        PgValue::Int(i) => query.bind(*i),
        PgValue::Float(f) => query.bind(*f),
        PgValue::Text(s) => query.bind(s.clone()),
        PgValue::Bytes(b) => query.bind(b.clone()),
        PgValue::Timestamp(t) => query.bind(*t),
        // Sequences are normally pre-formatted into literal text by the
        // scope's dialect pass; format here as well for direct callers.
        PgValue::IntSeq(items) => query.bind(array::encode_int_array(items)),
        PgValue::FloatSeq(items) => query.bind(array::encode_float_array(items)),
        PgValue::TextSeq(items) => query.bind(array::encode_text_array(items)),
    }
}

fn decode_column(row: &PgRow, index: usize, type_name: &str) -> Result<PgValue, sqlx::Error> {
    let value = match type_name {
        "BOOL" => row
            .try_get::<Option<bool>, _>(index)?
            .map_or(PgValue::Null, PgValue::Bool),
        "INT2" => row
            .try_get::<Option<i16>, _>(index)?
            .map_or(PgValue::Null, |v| PgValue::Int(i64::from(v))),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)?
            .map_or(PgValue::Null, |v| PgValue::Int(i64::from(v))),
        "INT8" => row
            .try_get::<Option<i64>, _>(index)?
            .map_or(PgValue::Null, PgValue::Int),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)?
            .map_or(PgValue::Null, |v| PgValue::Float(f64::from(v))),
        "FLOAT8" | "NUMERIC" => row
            .try_get::<Option<f64>, _>(index)?
            .map_or(PgValue::Null, PgValue::Float),
        "VARCHAR" | "TEXT" | "BPCHAR" | "CHAR" | "NAME" => row
            .try_get::<Option<String>, _>(index)?
            .map_or(PgValue::Null, PgValue::Text),
        "BYTEA" => row
            .try_get::<Option<Vec<u8>>, _>(index)?
            .map_or(PgValue::Null, PgValue::Bytes),
        "TIMESTAMPTZ" => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(index)?
            .map_or(PgValue::Null, PgValue::Timestamp),
        "TIMESTAMP" => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(index)?
            .map_or(PgValue::Null, |v| PgValue::Timestamp(v.and_utc())),
        "INT2[]" => row
            .try_get::<Option<Vec<i16>>, _>(index)?
            .map_or(PgValue::Null, |v| {
                PgValue::IntSeq(v.into_iter().map(i64::from).collect())
            }),
        "INT4[]" => row
            .try_get::<Option<Vec<i32>>, _>(index)?
            .map_or(PgValue::Null, |v| {
                PgValue::IntSeq(v.into_iter().map(i64::from).collect())
            }),
        "INT8[]" => row
            .try_get::<Option<Vec<i64>>, _>(index)?
            .map_or(PgValue::Null, PgValue::IntSeq),
        "FLOAT4[]" => row
            .try_get::<Option<Vec<f32>>, _>(index)?
            .map_or(PgValue::Null, |v| {
                PgValue::FloatSeq(v.into_iter().map(f64::from).collect())
            }),
        "FLOAT8[]" => row
            .try_get::<Option<Vec<f64>>, _>(index)?
            .map_or(PgValue::Null, PgValue::FloatSeq),
        "TEXT[]" | "VARCHAR[]" => row
            .try_get::<Option<Vec<String>>, _>(index)?
            .map_or(PgValue::Null, PgValue::TextSeq),
        // hstore and any other unmapped type arrive as their raw text form;
        // the destination's own unmarshal contract takes it from there.
        other => {
            let raw = row.try_get_raw(index)?;
            if raw.is_null() {
                PgValue::Null
            } else {
                let text = raw.as_str().map_err(|e| sqlx::Error::ColumnDecode {
                    index: other.to_string(),
                    source: e.into(),
                })?;
                PgValue::Text(text.to_string())
            }
        }
    };
    Ok(value)
}
