//! Error types for the RowBridge crate
//!
//! This module contains all error types that can be returned by RowBridge
//! operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowBridgeError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] row_fetch::FetchError),
}
