//! # RowBridge
//!
//! A Rust row materialization and dialect type bridging library for
//! PostgreSQL: executed queries become typed structures, with native array
//! and hstore column support.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rowbridge::prelude::*;
//!
//! #[derive(Debug, Default, Record)]
//! pub struct User {
//!     #[primary_key]
//!     pub id: i64,
//!
//!     #[field(size = 100)]
//!     pub user_name: String,
//!
//!     pub tags: Vec<String>,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "rowbridge".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let bridge = RowBridge::new(config).await?;
//!     let executor = bridge.executor();
//!     let mut scope = QueryScope::new("SELECT * FROM users WHERE id = $1 LIMIT 1")
//!         .bind(1i64);
//!
//!     match fetch_one::<User, _>(&executor, &mut scope).await {
//!         Ok(user) => println!("Found user: {}", user.user_name),
//!         Err(e) if e.is_not_found() => println!("No such user"),
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod migration;
pub mod prelude;

// Re-export the main public types for convenience
pub use core::RowBridge;
pub use errors::RowBridgeError;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, DatabaseConfig};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use pg_dialect;
pub use record_derive;
pub use row_fetch;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
