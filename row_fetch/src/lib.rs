//! Row Fetch - result materialization layer for rowbridge
//!
//! This crate turns executed queries into typed structures: it drives the
//! row cursor, binds result columns to destination fields by naming
//! convention, defers sequence-typed fields through a two-phase decode, and
//! enforces the scoped-resource discipline on the cursor.

pub mod cursor;
pub mod errors;
pub mod executor;
pub mod materialize;
pub mod memory;
pub mod record;
pub mod scope;

#[cfg(test)]
mod tests;

pub use cursor::{RowCursor, StatementExecutor};
pub use errors::FetchError;
pub use executor::{PgPoolExecutor, PgRowCursor};
pub use materialize::{fetch, fetch_all, fetch_all_boxed, fetch_one, Destination};
pub use memory::{MemoryCursor, MemoryExecutor};
pub use record::{
    column_to_field_name, field_to_column_name, snake_to_upper_camel, FieldDescriptor, Record,
};
pub use scope::{BindMode, QueryScope};
