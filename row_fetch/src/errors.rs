use thiserror::Error;

/// Errors raised while materializing a result set.
///
/// Values are cheap to clone so the same error can flow through the scope's
/// shared channel and the call's return path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The statement failed to execute; the cursor was never iterated.
    #[error("query execution failed: {0}")]
    Execution(String),

    /// One row could not be read from the cursor.
    #[error("row scan failed: {0}")]
    RowScan(String),

    /// A row value could not be copied into its destination field.
    #[error("column {column}: {reason}")]
    Bind { column: String, reason: String },

    /// A result column matched no destination field (strict mode only).
    #[error("column {column} has no matching field")]
    UnmatchedColumn { column: String },

    /// The query produced zero rows.
    #[error("record not found")]
    NotFound,
}

impl FetchError {
    /// Distinguishes the ordinary no-rows outcome of a single-record lookup
    /// from real failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound)
    }
}
