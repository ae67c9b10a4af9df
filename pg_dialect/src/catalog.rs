//! Catalog existence probes
//!
//! Boolean checks against the information_schema metadata views, used by
//! schema migration to decide whether tables or columns already exist.

use sqlx::PgPool;
use tracing::debug;

/// Check whether a table exists in the connected database.
pub async fn has_table(pool: &PgPool, table_name: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT count(*) FROM information_schema.tables WHERE table_name = $1",
    )
    .bind(table_name)
    .fetch_one(pool)
    .await?;

    debug!(table = table_name, count, "table existence probe");
    Ok(count > 0)
}

/// Check whether a column exists on a table in the connected database.
pub async fn has_column(
    pool: &PgPool,
    table_name: &str,
    column_name: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT count(*) FROM information_schema.columns WHERE table_name = $1 AND column_name = $2",
    )
    .bind(table_name)
    .bind(column_name)
    .fetch_one(pool)
    .await?;

    debug!(table = table_name, column = column_name, count, "column existence probe");
    Ok(count > 0)
}
