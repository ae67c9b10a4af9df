//! Convenience re-exports for common RowBridge usage
//!
//! This prelude module re-exports the most commonly used items from the
//! RowBridge ecosystem, making it easier to import everything you need with
//! a single use statement.
//!
//! # Example
//!
//! ```rust
//! use rowbridge::prelude::*;
//!
//! // Now you have access to all the common RowBridge types and traits
//! ```

// Core RowBridge components
pub use crate::core::RowBridge;
pub use crate::errors::RowBridgeError;
pub use crate::migration;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, DatabaseConfig};

// Re-export the materialization layer
pub use row_fetch::{
    fetch, fetch_all, fetch_all_boxed, fetch_one, BindMode, Destination, FetchError,
    FieldDescriptor, MemoryCursor, MemoryExecutor, PgPoolExecutor, QueryScope, Record, RowCursor,
    StatementExecutor,
};

// Re-export the dialect type bridge
pub use pg_dialect::{DialectError, ElemKind, FieldKind, Hstore, PgDialect, PgValue};

// Re-export internal crates for macro-generated code
pub use pg_dialect;
pub use row_fetch;

// Re-export the record derive for destination structs
pub use record_derive::Record;

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use sqlx;
pub use tokio;

// Commonly used external types
pub use chrono::{DateTime, Utc};
pub use sqlx::PgPool;
