//! Statement execution and cursor interface
//!
//! The boundary to the driver layer: an executor turns statement text plus
//! bind values into a forward-only row cursor. The materializer owns the
//! cursor for exactly one call and closes it on every exit path.

use async_trait::async_trait;
use pg_dialect::PgValue;

use crate::errors::FetchError;

/// Forward-only cursor over the rows of an executed statement.
#[async_trait]
pub trait RowCursor: Send {
    /// Result column names, in result order.
    fn columns(&self) -> &[String];

    /// Advance to the next row, or `None` once exhausted.
    ///
    /// A row-level failure advances past the failed row before returning its
    /// error, so callers may keep iterating.
    async fn next_row(&mut self) -> Result<Option<Vec<PgValue>>, FetchError>;

    /// Release the underlying result resources. Invoked exactly once per
    /// materialization call.
    async fn close(&mut self) -> Result<(), FetchError>;
}

/// Executes a built statement and hands back a cursor over its result.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    type Cursor: RowCursor;

    async fn execute(&self, sql: &str, params: &[PgValue]) -> Result<Self::Cursor, FetchError>;
}
