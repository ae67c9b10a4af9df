//! Core RowBridge functionality
//!
//! This module contains the main RowBridge struct and its implementation,
//! providing the connection pool, the statement executor handed to the
//! materializer, and catalog probes.

use sqlx::PgPool;
use std::time::Duration;

use crate::errors::RowBridgeError;
use config::{AppConfig, DatabaseConfig};
use row_fetch::PgPoolExecutor;

/// Main RowBridge coordinator that manages the database connection and hands
/// out executors for result materialization.
pub struct RowBridge {
    pool: PgPool,
}

impl RowBridge {
    /// Create a new RowBridge with a database connection
    pub async fn new(config: DatabaseConfig) -> Result<Self, RowBridgeError> {
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;

        Ok(Self { pool })
    }

    /// Create a RowBridge from the application's TOML/.env configuration
    pub async fn from_env() -> Result<Self, RowBridgeError> {
        let config = AppConfig::load()?;
        Self::new(config.database).await
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Build a statement executor backed by this pool, for use with the
    /// materialization entry points
    pub fn executor(&self) -> PgPoolExecutor {
        PgPoolExecutor::new(self.pool.clone())
    }

    /// Check whether a table exists in the connected database
    pub async fn has_table(&self, table_name: &str) -> Result<bool, RowBridgeError> {
        Ok(pg_dialect::has_table(&self.pool, table_name).await?)
    }

    /// Check whether a column exists on a table in the connected database
    pub async fn has_column(
        &self,
        table_name: &str,
        column_name: &str,
    ) -> Result<bool, RowBridgeError> {
        Ok(pg_dialect::has_column(&self.pool, table_name, column_name).await?)
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), RowBridgeError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
