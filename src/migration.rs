//! Database migration functionality
//!
//! This module provides automatic table creation for Record types managed by
//! RowBridge, built on the dialect's column type mapping and catalog probes.

use tracing::debug;

use crate::core::RowBridge;
use crate::errors::RowBridgeError;
use pg_dialect::{primary_key_sql, sql_type, PgDialect};
use row_fetch::{field_to_column_name, Record};

/// Build the CREATE TABLE statement for a record type.
///
/// Column names come from the descriptor table's logical names converted
/// back to the column naming convention. Panics if any field kind has no
/// column type mapping; that is a schema definition error, not a runtime
/// condition.
pub fn create_table_sql<T: Record>(table_name: &str) -> String {
    let dialect = PgDialect;
    let columns: Vec<String> = T::fields()
        .iter()
        .map(|field| {
            let column = dialect.quote(&field_to_column_name(field.name));
            if field.primary_key {
                format!("{} {}", column, primary_key_sql(field.kind))
            } else {
                format!("{} {}", column, sql_type(field.kind, field.size))
            }
        })
        .collect();

    format!(
        "CREATE TABLE {} ({})",
        dialect.quote(table_name),
        columns.join(", ")
    )
}

/// Build the DROP TABLE statement for a table.
pub fn drop_table_sql(table_name: &str) -> String {
    format!("DROP TABLE IF EXISTS {} CASCADE", PgDialect.quote(table_name))
}

impl RowBridge {
    /// Create the table for a record type if it does not already exist.
    /// If recreate is true, drops any existing table first.
    pub async fn auto_migrate<T>(&self, table_name: &str, recreate: bool) -> Result<(), RowBridgeError>
    where
        T: Record,
    {
        if recreate {
            let drop_sql = drop_table_sql(table_name);
            debug!(sql = drop_sql.as_str(), "dropping table");
            sqlx::query(&drop_sql).execute(self.pool()).await?;
        } else if self.has_table(table_name).await? {
            debug!(table = table_name, "table already exists, skipping");
            return Ok(());
        }

        let create_sql = create_table_sql::<T>(table_name);
        debug!(sql = create_sql.as_str(), "creating table");
        sqlx::query(&create_sql).execute(self.pool()).await?;

        Ok(())
    }
}
