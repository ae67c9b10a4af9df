//! Per-call query scope
//!
//! A `QueryScope` carries one materialization call's built statement text,
//! its ordered bind values, the dialect in effect, and the error channel
//! shared by everything that touches the call. Statement construction itself
//! happens upstream; the scope only transports the finished pieces.

use pg_dialect::{PgDialect, PgValue};

use crate::errors::FetchError;

/// How strictly row binding treats unmatched columns and per-field failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindMode {
    /// Unmatched columns are discarded and a failed field bind is recorded
    /// without halting row iteration.
    #[default]
    Tolerant,
    /// Unmatched columns and failed field binds abort the call.
    Strict,
}

#[derive(Debug)]
pub struct QueryScope {
    sql: String,
    params: Vec<PgValue>,
    dialect: PgDialect,
    bind_mode: BindMode,
    errors: Vec<FetchError>,
}

impl QueryScope {
    pub fn new(sql: impl Into<String>) -> Self {
        Self::with_dialect(sql, PgDialect)
    }

    pub fn with_dialect(sql: impl Into<String>, dialect: PgDialect) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            dialect,
            bind_mode: BindMode::default(),
            errors: Vec::new(),
        }
    }

    /// Append a bind value for the next positional placeholder.
    pub fn bind(mut self, value: impl Into<PgValue>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn bind_mode(mut self, mode: BindMode) -> Self {
        self.bind_mode = mode;
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[PgValue] {
        &self.params
    }

    pub fn dialect(&self) -> PgDialect {
        self.dialect
    }

    pub fn mode(&self) -> BindMode {
        self.bind_mode
    }

    /// Bind values with the dialect's pre-binding conversion applied;
    /// sequence values become array literal text.
    pub fn prepared_params(&self) -> Vec<PgValue> {
        self.params
            .iter()
            .cloned()
            .map(|value| self.dialect.db_value(value))
            .collect()
    }

    /// Record a recoverable error on the shared channel.
    pub fn record_error(&mut self, error: FetchError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All errors recorded during the call, in arrival order.
    pub fn errors(&self) -> &[FetchError] {
        &self.errors
    }

    pub fn first_error(&self) -> Option<FetchError> {
        self.errors.first().cloned()
    }
}
